//! Equality filtering and offset/limit pagination over an in-memory record
//! set.

use crate::response::Page;
use crate::store::Record;
use serde_json::Value;

pub const DEFAULT_LIMIT: usize = 10;

/// Splits query params into pagination keys (`offset`, `limit`) and equality
/// filters, applies both, and wraps the result in the page envelope.
///
/// Malformed numeric params fall back to the defaults (offset 0, limit 10)
/// rather than erroring.
pub fn run(records: &[Record], params: &[(String, String)]) -> Page {
    let mut offset = 0usize;
    let mut limit = DEFAULT_LIMIT;
    let mut filters: Vec<(&str, &str)> = Vec::new();
    for (k, v) in params {
        match k.as_str() {
            "offset" => offset = v.parse().unwrap_or(0),
            "limit" => limit = v.parse().unwrap_or(DEFAULT_LIMIT),
            _ => filters.push((k.as_str(), v.as_str())),
        }
    }

    let matches: Vec<&Record> = records
        .iter()
        .filter(|r| matches_filters(r, &filters))
        .collect();
    let total = matches.len();

    let data = if offset >= total {
        Vec::new()
    } else {
        let end = (offset + limit).min(total);
        matches[offset..end].iter().map(|r| (*r).clone()).collect()
    };

    Page {
        total,
        limit,
        offset,
        data,
    }
}

fn matches_filters(record: &Record, filters: &[(&str, &str)]) -> bool {
    filters
        .iter()
        .all(|(k, v)| coerce_to_string(record.get(*k)) == *v)
}

/// Filter comparison is over string forms, so a numeric field matches its
/// decimal query text regardless of JSON type. Missing fields coerce to
/// "undefined" and only match a literal query of that text.
fn coerce_to_string(v: Option<&Value>) -> String {
    match v {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
