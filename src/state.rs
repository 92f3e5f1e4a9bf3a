//! Shared state for one mounted route group.

use crate::config::CrudOptions;
use crate::store::FileStore;
use std::sync::Arc;

/// One store handle per data dir, shared across groups; one options set per
/// group.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
    pub options: Arc<CrudOptions>,
}
