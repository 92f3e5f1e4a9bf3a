//! Generic CRUD execution against the flat-file store.
//!
//! Every mutation is a read-modify-write: the read completes before the
//! dependent write is issued, but nothing serializes two in-flight mutations
//! on the same entity (see `FileStore`).

use crate::config::RuleSet;
use crate::error::AppError;
use crate::response::Page;
use crate::service::{query, RuleEvaluator};
use crate::store::{FileStore, Record};
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// List records with equality filters and offset/limit paging taken from
    /// the query params.
    pub async fn list(
        store: &FileStore,
        entity: &str,
        params: &[(String, String)],
    ) -> Result<Page, AppError> {
        let records = store.load(entity).await?;
        Ok(query::run(&records, params))
    }

    /// Fetch the first record whose `id` matches, or `None`.
    pub async fn get_by_id(
        store: &FileStore,
        entity: &str,
        id: i64,
    ) -> Result<Option<Record>, AppError> {
        let records = store.load(entity).await?;
        Ok(records.into_iter().find(|r| record_id(r) == Some(id)))
    }

    /// Validate and append a record. Validation failures abort before any id
    /// is allocated or any I/O happens. The id is assigned by the store; a
    /// client-supplied id is overwritten.
    pub async fn create(
        store: &FileStore,
        entity: &str,
        rules: &RuleSet,
        mut candidate: Record,
    ) -> Result<Record, AppError> {
        let errors = RuleEvaluator::validate(&candidate, rules);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let mut records = store.load(entity).await?;
        let id = next_id(&records);
        candidate.insert("id".to_string(), Value::from(id));
        tracing::debug!(entity, id, "create");
        records.push(candidate.clone());
        store.save(entity, &records).await?;
        Ok(candidate)
    }

    /// Replace the first record whose `id` matches, wholesale — no partial
    /// merge, and the caller is responsible for keeping `id` inside the
    /// replacement if it should persist. When nothing matches, the document
    /// is still rewritten unchanged and the replacement is echoed back as
    /// the result; callers that need a not-found signal must check first.
    pub async fn replace_by_id(
        store: &FileStore,
        entity: &str,
        id: i64,
        replacement: Record,
    ) -> Result<Record, AppError> {
        let mut records = store.load(entity).await?;
        if let Some(slot) = records.iter_mut().find(|r| record_id(r) == Some(id)) {
            *slot = replacement.clone();
        }
        tracing::debug!(entity, id, "replace");
        store.save(entity, &records).await?;
        Ok(replacement)
    }

    /// Remove the first record whose `id` matches. A miss is a silent no-op;
    /// the document is rewritten regardless.
    pub async fn delete_by_id(store: &FileStore, entity: &str, id: i64) -> Result<(), AppError> {
        let mut records = store.load(entity).await?;
        if let Some(pos) = records.iter().position(|r| record_id(r) == Some(id)) {
            records.remove(pos);
        }
        tracing::debug!(entity, id, "delete");
        store.save(entity, &records).await?;
        Ok(())
    }
}

/// Next unique id: one past the highest existing id, 1 for an empty store.
/// Records without an integer id are ignored. Not unique under concurrent
/// writers; see `FileStore`.
pub fn next_id(records: &[Record]) -> i64 {
    records.iter().filter_map(record_id).fold(0, i64::max) + 1
}

fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}
