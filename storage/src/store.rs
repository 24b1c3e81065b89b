use std::path::Path;

use serde_json::Value;

use crate::error::StorageError;

/// Reads and writes structured documents at a path. The encoding is owned by the
/// implementation; callers only see `serde_json::Value` documents.
pub trait DocumentStore: Send + Sync {
    fn read(&self, path: &Path) -> Result<Value, StorageError>;
    fn write(&self, path: &Path, document: &Value) -> Result<(), StorageError>;
}
