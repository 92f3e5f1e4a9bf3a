//! Response payload shapes.

use crate::store::Record;
use serde::Serialize;
use serde_json::Value;

/// Paginated list envelope. `total` counts every record matching the
/// filters, before the `offset`/`limit` window is applied.
#[derive(Clone, Debug, Serialize)]
pub struct Page {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub data: Vec<Record>,
}

/// `{}` — the body for a get-by-id miss and for every delete.
pub fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
