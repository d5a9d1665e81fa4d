//! Example demonstrating the preference store
//!
//! Uses the standalone helpers first, then drives the same file through the
//! named-operation handler with JSON requests.

use prefs_store::{
    AppDataDir, AppName, PathResolver, PrefsHandler, delete_value, has_value, list_keys,
    read_value, write_value,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> prefs_store::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let prefs = AppDataDir::new(AppName::new("com", "example", "prefs_store_demo"));

    println!("=== Preference Store Example ===\n");
    println!("Backing file: {}\n", prefs.resolve()?.display());

    // 1. Write a few values
    println!("1. Writing values...");
    write_value(prefs.clone(), "theme", "dark").await?;
    write_value(prefs.clone(), "font_size", 16).await?;
    write_value(prefs.clone(), "auto_save", true).await?;
    write_value(
        prefs.clone(),
        "recent_files",
        vec!["notes.md".to_string(), "todo.txt".to_string()],
    )
    .await?;
    println!("   ✓ Values written\n");

    // 2. Read one back
    println!("2. Reading theme...");
    let theme = read_value(prefs.clone(), "theme").await?;
    println!("   ✓ Theme: {:?}\n", theme);

    // 3. Check if a key exists
    println!("3. Checking if key exists...");
    let exists = has_value(prefs.clone(), "font_size").await?;
    println!("   ✓ Key 'font_size' exists: {}\n", exists);

    // 4. List all keys
    println!("4. Listing all keys...");
    let keys = list_keys(prefs.clone()).await?;
    println!("   ✓ Keys: {:?}\n", keys);

    // 5. Delete a value
    println!("5. Deleting theme...");
    let was_deleted = delete_value(prefs.clone(), "theme").await?;
    println!("   ✓ Deleted: {}\n", was_deleted);

    // 6. Named operations over JSON
    println!("6. Sending JSON requests...");
    let mut handler = PrefsHandler::new(prefs);
    for request in [
        r#"{"method":"setDouble","arguments":{"key":"zoom","value":1.25}}"#,
        r#"{"method":"setInt","arguments":{"key":"launch_count"}}"#,
        r#"{"method":"getAll"}"#,
        r#"{"method":"getInt","arguments":{"key":"launch_count"}}"#,
        r#"{"method":"clear"}"#,
    ] {
        let response = handler.handle_json(request).await;
        println!("   → {}\n   ← {}", request, response);
    }

    let remaining = handler.store().keys().await?;
    println!("\n7. Keys after clear: {:?}", remaining);
    println!("\n=== Example Complete ===");

    Ok(())
}
