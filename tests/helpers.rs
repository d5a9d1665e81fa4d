use prefs_store::{
    FixedPath, PrefValue, delete_value, has_value, list_keys, read_all, read_value, write_value,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_helpers_share_one_file() {
    let dir = TempDir::new().unwrap();
    let prefs = FixedPath::new(dir.path().join("prefs.json"));

    write_value(prefs.clone(), "theme", "dark").await.unwrap();
    write_value(prefs.clone(), "font_size", 14).await.unwrap();

    assert_eq!(
        read_value(prefs.clone(), "theme").await.unwrap(),
        Some(PrefValue::from("dark"))
    );
    assert!(has_value(prefs.clone(), "font_size").await.unwrap());
    assert_eq!(
        list_keys(prefs.clone()).await.unwrap(),
        vec!["font_size".to_string(), "theme".to_string()]
    );

    assert!(delete_value(prefs.clone(), "theme").await.unwrap());
    assert!(!delete_value(prefs.clone(), "theme").await.unwrap());
    assert_eq!(read_value(prefs.clone(), "theme").await.unwrap(), None);

    let all = read_all(prefs).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all["font_size"], PrefValue::Int(14));
}
