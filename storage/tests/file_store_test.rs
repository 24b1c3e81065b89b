//! Integration tests for [`storage::FileStore`].
//!
//! Covers YAML and JSON round trips through real files, parent directory creation, replacing
//! an existing file and the errors reported for missing or malformed files.

use serde_json::json;
use storage::{DocumentStore, FileStore, StorageError};
use tempfile::TempDir;

/// **Test: A YAML document written to disk reads back unchanged.**
///
/// **Setup:** Temp dir; document with nested list and a null field.
/// **Action:** `write` to `cache.yaml`, then `read`.
/// **Expected:** Same value; file content is YAML (not JSON).
#[test]
fn test_yaml_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("cache.yaml");
    let document = json!({
        "apiVersion": "qacache.io/v1alpha1",
        "kind": "QACache",
        "spec": {"solutions": [{"id": "q1", "type": "Input", "answer": "8080"}]}
    });

    let store = FileStore::new();
    store.write(&path, &document).expect("write");

    let contents = std::fs::read_to_string(&path).expect("read file");
    assert!(contents.contains("kind: QACache"));
    assert_eq!(store.read(&path).expect("read"), document);
}

/// **Test: A `.json` path is written as JSON.**
///
/// **Setup:** Temp dir.
/// **Action:** `write` to `cache.json`, parse the file with serde_json.
/// **Expected:** File parses as JSON and equals the document.
#[test]
fn test_json_by_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("cache.json");
    let document = json!({"kind": "QACache", "spec": {"solutions": []}});

    FileStore::new().write(&path, &document).expect("write");

    let contents = std::fs::read_to_string(&path).expect("read file");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(parsed, document);
}

/// **Test: Missing parent directories are created on write.**
#[test]
fn test_write_creates_parent_dirs() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("deeper").join("cache.yaml");

    FileStore::new()
        .write(&path, &json!({"kind": "QACache"}))
        .expect("write");

    assert!(path.exists());
}

/// **Test: Rewriting an existing file replaces it whole and leaves no staging file behind.**
///
/// **Setup:** Temp dir holding `cache.yaml` with a longer first document.
/// **Action:** `write` a shorter document to the same path.
/// **Expected:** The file reads back as the new document only; the directory holds just
/// `cache.yaml`.
#[test]
fn test_write_replaces_existing_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("cache.yaml");
    let store = FileStore::new();
    store
        .write(
            &path,
            &json!({"kind": "QACache", "spec": {"solutions": [
                {"id": "q1", "type": "Input", "answer": "a long first answer"},
                {"id": "q2", "type": "Input", "answer": "another one"}
            ]}}),
        )
        .expect("first write");

    let second = json!({"kind": "QACache", "spec": {"solutions": []}});
    store.write(&path, &second).expect("second write");

    assert_eq!(store.read(&path).expect("read"), second);
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .expect("list dir")
        .map(|e| e.expect("dir entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("cache.yaml")]);
}

/// **Test: Reading a missing file is an Io error of kind NotFound.**
#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let err = FileStore::new()
        .read(&dir.path().join("absent.yaml"))
        .unwrap_err();

    assert!(matches!(err, StorageError::Io { .. }));
    assert!(err.is_not_found());
}

/// **Test: Malformed YAML is a Parse error naming the path.**
#[test]
fn test_read_malformed_yaml() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "kind: [unclosed\n").expect("seed file");

    let err = FileStore::new().read(&path).unwrap_err();

    assert!(matches!(err, StorageError::Parse { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}
