//! Storage error types.
//!
//! Used by document store implementations and callers of storage APIs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing documents.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error at {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StorageError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True when the document does not exist (missing file or absent in-memory entry).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
