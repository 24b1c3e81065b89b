//! File-backed document store.
//!
//! The encoding follows the file extension: `.json` is written as pretty JSON, every other
//! extension (`.yaml`, `.yml`, none) as YAML.
//!
//! Writes go to a temporary file in the target's directory which is then renamed over the
//! target, so a crash mid-write leaves the previous document intact.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    pub fn decode(self, path: &Path, bytes: &str) -> Result<Value, StorageError> {
        match self {
            DocumentFormat::Json => {
                serde_json::from_str(bytes).map_err(|e| StorageError::parse(path, e))
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(bytes).map_err(|e| StorageError::parse(path, e))
            }
        }
    }

    pub fn encode(self, path: &Path, document: &Value) -> Result<String, StorageError> {
        match self {
            DocumentFormat::Json => {
                serde_json::to_string_pretty(document).map_err(|e| StorageError::parse(path, e))
            }
            DocumentFormat::Yaml => {
                serde_yaml::to_string(document).map_err(|e| StorageError::parse(path, e))
            }
        }
    }
}

/// Stores each document in its own file.
#[derive(Debug, Clone, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FileStore {
    fn read(&self, path: &Path) -> Result<Value, StorageError> {
        let format = DocumentFormat::from_path(path);
        debug!(path = %path.display(), format = ?format, "Reading document");
        let contents = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        format.decode(path, &contents)
    }

    fn write(&self, path: &Path, document: &Value) -> Result<(), StorageError> {
        let format = DocumentFormat::from_path(path);
        let contents = format.encode(path, document)?;
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
                parent
            }
            None => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        staged
            .write_all(contents.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| StorageError::io(staged.path(), e))?;
        staged
            .persist(path)
            .map_err(|e| StorageError::io(path, e.error))?;
        info!(path = %path.display(), format = ?format, "Document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(&PathBuf::from("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(&PathBuf::from("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(&PathBuf::from("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(&PathBuf::from("cache")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_decode_yaml_into_value() {
        let path = PathBuf::from("cache.yaml");
        let value = DocumentFormat::Yaml
            .decode(&path, "kind: QACache\nspec:\n  solutions:\n    - id: q1\n      answer: \"8080\"\n")
            .unwrap();
        assert_eq!(value["kind"], "QACache");
        assert_eq!(value["spec"]["solutions"][0]["answer"], "8080");
    }

    #[test]
    fn test_decode_reports_parse_error() {
        let path = PathBuf::from("cache.json");
        let err = DocumentFormat::Json.decode(&path, "{not json").unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(!err.is_not_found());
    }
}
