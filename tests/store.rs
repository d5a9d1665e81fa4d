use std::fs;
use std::path::{Path, PathBuf};

use prefs_store::{FixedPath, PrefStore, PrefValue, StoreError};
use serde_json::{Value, json};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> (PrefStore<FixedPath>, PathBuf) {
    let path = dir.path().join("prefs.json");
    (PrefStore::new(FixedPath::new(path.clone())), path)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_missing_file_is_created_empty() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);

    assert!(store.get_all().await.unwrap().is_empty());
    assert_eq!(read_json(&path), json!({}));
}

#[tokio::test]
async fn test_values_survive_restart() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);

    store.set_value("k", 5).await.unwrap();
    store.set_value("ratio", 0.5).await.unwrap();
    store.set_value("name", "prefs").await.unwrap();
    store.set_value("enabled", true).await.unwrap();
    store
        .set_value("recent", vec!["a".to_string(), "b".to_string(), "c".to_string()])
        .await
        .unwrap();
    store.set_value("nothing", PrefValue::Null).await.unwrap();
    drop(store);

    let mut reopened = PrefStore::new(FixedPath::new(path));
    let all = reopened.get_all().await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all["k"], PrefValue::Int(5));
    assert_eq!(all["ratio"], PrefValue::Double(0.5));
    assert_eq!(all["name"], PrefValue::from("prefs"));
    assert_eq!(all["enabled"], PrefValue::Bool(true));
    assert_eq!(
        all["recent"],
        PrefValue::StringList(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!(all["nothing"], PrefValue::Null);
}

#[tokio::test]
async fn test_overwrite_replaces_value_and_kind() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);

    store.set_value("k", 1).await.unwrap();
    store.set_value("k", "one").await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), Some(PrefValue::from("one")));
    assert_eq!(read_json(&path), json!({ "k": "one" }));
}

#[tokio::test]
async fn test_corrupt_file_is_reset() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(&path, b"\xff\xfe not json {{{").unwrap();

    assert!(store.get_all().await.unwrap().is_empty());
    assert_eq!(read_json(&path), json!({}));
}

#[tokio::test]
async fn test_non_object_document_is_reset() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(store.get_all().await.unwrap().is_empty());
    assert_eq!(read_json(&path), json!({}));
}

#[tokio::test]
async fn test_empty_file_is_reset() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(&path, "").unwrap();

    assert!(store.keys().await.unwrap().is_empty());
    assert_eq!(read_json(&path), json!({}));
}

#[tokio::test]
async fn test_first_write_keeps_existing_data() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(&path, r#"{"existing": 1}"#).unwrap();

    store.set_value("new", 2).await.unwrap();

    assert_eq!(read_json(&path), json!({ "existing": 1, "new": 2 }));
}

#[tokio::test]
async fn test_clear_twice() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    store.set_value("a", 1).await.unwrap();

    store.clear().await.unwrap();
    assert_eq!(read_json(&path), json!({}));
    store.clear().await.unwrap();
    assert_eq!(read_json(&path), json!({}));

    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_absent_key() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    store.set_value("a", 1).await.unwrap();

    assert!(!store.remove("nonexistent").await.unwrap());
    assert_eq!(read_json(&path), json!({ "a": 1 }));

    assert!(store.remove("a").await.unwrap());
    assert!(!store.contains_key("a").await.unwrap());
    assert_eq!(read_json(&path), json!({}));
}

#[tokio::test]
async fn test_nested_object_reads_as_null() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(
        &path,
        r#"{"nested": {"a": 1}, "mixed": ["a", 2], "ok": ["x"], "big": 5000000000}"#,
    )
    .unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(all["nested"], PrefValue::Null);
    assert_eq!(all["mixed"], PrefValue::Null);
    assert_eq!(all["ok"], PrefValue::StringList(vec!["x".into()]));
    assert_eq!(all["big"], PrefValue::Double(5_000_000_000.0));
}

#[tokio::test]
async fn test_file_uses_three_space_indent() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);

    store.set_value("a", 1).await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n   \"a\": 1\n}");
    assert!(!dir.path().join("prefs.json.tmp").exists());
}

#[tokio::test]
async fn test_missing_parent_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("prefs.json");
    let mut store = PrefStore::new(FixedPath::new(path.clone()));

    store.set_value("a", true).await.unwrap();

    assert_eq!(read_json(&path), json!({ "a": true }));
}

#[tokio::test]
async fn test_persistence_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    // A regular file where a directory is expected
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let mut store = PrefStore::new(FixedPath::new(blocker.join("prefs.json")));

    let err = store.set_value("k", 1).await.unwrap_err();
    assert!(err.is_persistence_failure(), "unexpected error: {err}");

    let err = store.clear().await.unwrap_err();
    assert!(matches!(err, StoreError::PersistenceFailed { .. }));
}

#[tokio::test]
async fn test_reload_sees_external_writes() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    store.set_value("a", 1).await.unwrap();

    fs::write(&path, r#"{"b": "external"}"#).unwrap();
    // Cached until reloaded
    assert_eq!(store.keys().await.unwrap(), vec!["a".to_string()]);

    store.reload().await.unwrap();
    assert_eq!(store.keys().await.unwrap(), vec!["b".to_string()]);
}

#[tokio::test]
async fn test_resolver_failure_is_returned() {
    let mut store = PrefStore::new(|| -> prefs_store::Result<PathBuf> {
        Err(StoreError::NoStorageDir)
    });

    assert!(matches!(
        store.get_all().await,
        Err(StoreError::NoStorageDir)
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_is_left_intact() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::write(&path, r#"{"precious": "data"}"#).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop a privileged user
    if fs::File::open(&path).is_ok() {
        return;
    }

    let err = store.get_all().await.unwrap_err();
    assert!(matches!(err, StoreError::ReadFailed { .. }), "unexpected error: {err}");
    assert!(store.set_value("k", 1).await.is_err());

    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
    assert_eq!(read_json(&path), json!({ "precious": "data" }));
}

#[tokio::test]
async fn test_directory_in_place_of_file_is_not_replaced() {
    let dir = TempDir::new().unwrap();
    let (mut store, path) = store_in(&dir);
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep.txt"), "kept").unwrap();

    let err = store.get_all().await.unwrap_err();
    assert!(matches!(err, StoreError::ReadFailed { .. }), "unexpected error: {err}");

    assert!(path.is_dir());
    assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "kept");
}
