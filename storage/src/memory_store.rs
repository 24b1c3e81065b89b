//! # In-Memory Document Store
//!
//! [`InMemoryStore`] keeps documents in a map keyed by path.
//!
//! **Use for**: tests and dry runs where nothing should touch the disk.
//!
//! **Limitations**: data is lost when the last handle is dropped.
//!
//! ## Thread Safety
//!
//! Clones share the same map through `Arc<RwLock<>>`, so a test can keep a handle to inspect
//! what a cache wrote.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::StorageError;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<HashMap<PathBuf, Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the document stored at `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Value> {
        self.documents
            .read()
            .ok()
            .and_then(|docs| docs.get(path).cloned())
    }

    /// Seeds a document, replacing any previous one.
    pub fn insert(&self, path: impl Into<PathBuf>, document: Value) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(path.into(), document);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(path: &Path) -> StorageError {
    StorageError::io(path, io::Error::new(io::ErrorKind::Other, "store lock poisoned"))
}

impl DocumentStore for InMemoryStore {
    fn read(&self, path: &Path) -> Result<Value, StorageError> {
        let docs = self.documents.read().map_err(|_| poisoned(path))?;
        docs.get(path).cloned().ok_or_else(|| {
            StorageError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no document at path"),
            )
        })
    }

    fn write(&self, path: &Path, document: &Value) -> Result<(), StorageError> {
        let mut docs = self.documents.write().map_err(|_| poisoned(path))?;
        docs.insert(path.to_path_buf(), document.clone());
        Ok(())
    }
}
