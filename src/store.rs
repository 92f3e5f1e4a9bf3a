//! Flat-file record store: one JSON array document per entity.

use crate::error::AppError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A schema-free record. Entities are caller-defined; the only field the
/// store itself cares about is the integer `id` assigned on create.
pub type Record = serde_json::Map<String, Value>;

/// Stores each entity as one JSON array document at `<data_dir>/<entity>.json`.
///
/// Mutations are whole-document read-modify-write with no locking: two
/// writers racing on the same entity can lose the earlier write (last write
/// wins), and a crash mid-write can leave a truncated document. Share one
/// instance per data dir via `Arc` rather than opening several.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if absent.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        Ok(FileStore { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, entity: &str) -> Result<PathBuf, AppError> {
        if !is_valid_segment(entity) {
            return Err(AppError::BadRequest(format!(
                "invalid entity name '{}'",
                entity
            )));
        }
        Ok(self.data_dir.join(format!("{}.json", entity)))
    }

    /// Creates the entity document with an empty array if it does not exist.
    /// Idempotent.
    pub async fn ensure_exists(&self, entity: &str) -> Result<(), AppError> {
        let path = self.document_path(entity)?;
        if fs::try_exists(&path).await? {
            return Ok(());
        }
        tracing::debug!(entity, path = %path.display(), "creating empty document");
        fs::write(&path, b"[]").await?;
        Ok(())
    }

    /// Loads the entity's records, creating an empty document on first
    /// access. A read or parse failure is surfaced to the caller, not
    /// retried.
    pub async fn load(&self, entity: &str) -> Result<Vec<Record>, AppError> {
        self.ensure_exists(entity).await?;
        let path = self.document_path(entity)?;
        let raw = fs::read_to_string(&path).await?;
        let records: Vec<Record> = serde_json::from_str(&raw)?;
        Ok(records)
    }

    /// Overwrites the entity document with the given records.
    pub async fn save(&self, entity: &str, records: &[Record]) -> Result<(), AppError> {
        let path = self.document_path(entity)?;
        let raw = serde_json::to_string(records)?;
        tracing::debug!(entity, bytes = raw.len(), "writing document");
        fs::write(&path, raw).await?;
        Ok(())
    }
}

/// Entity names (and route prefixes) may come straight from the URL, so a
/// crafted segment must not be able to escape the data dir.
pub fn is_valid_segment(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
