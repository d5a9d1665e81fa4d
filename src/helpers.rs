//! Standalone helper functions for direct store access
//!
//! Each helper opens the backing file, performs one operation and returns.
//! Useful for CLI tools, scripts, or reading preferences outside of the
//! long-lived [`PrefsHandler`](crate::PrefsHandler).

use std::collections::BTreeMap;

use crate::error::Result;
use crate::path::PathResolver;
use crate::store::PrefStore;
use crate::value::PrefValue;

/// Read a value from the store
///
/// Returns `Ok(None)` if the key is not present.
///
/// # Example
///
/// ```ignore
/// use prefs_store::{AppDataDir, AppName, read_value};
///
/// async fn load_theme() -> prefs_store::Result<Option<String>> {
///     let app_name = AppName::new("com", "example", "myapp");
///     let value = read_value(AppDataDir::new(app_name), "theme").await?;
///     Ok(value.and_then(|v| v.as_str().map(str::to_string)))
/// }
/// ```
pub async fn read_value<R: PathResolver>(resolver: R, key: &str) -> Result<Option<PrefValue>> {
    PrefStore::new(resolver).get(key).await
}

/// Read every value in the store
pub async fn read_all<R: PathResolver>(resolver: R) -> Result<BTreeMap<String, PrefValue>> {
    PrefStore::new(resolver).get_all().await
}

/// Write a value to the store
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```ignore
/// use prefs_store::{AppDataDir, AppName, write_value};
///
/// async fn save_font_size() -> prefs_store::Result<()> {
///     let app_name = AppName::new("com", "example", "myapp");
///     write_value(AppDataDir::new(app_name), "font_size", 14).await
/// }
/// ```
pub async fn write_value<R: PathResolver>(
    resolver: R,
    key: &str,
    value: impl Into<PrefValue>,
) -> Result<()> {
    PrefStore::new(resolver).set_value(key, value).await
}

/// Delete a value from the store
///
/// Returns `Ok(true)` if the value was deleted, `Ok(false)` if it didn't exist.
pub async fn delete_value<R: PathResolver>(resolver: R, key: &str) -> Result<bool> {
    PrefStore::new(resolver).remove(key).await
}

/// Check if a key exists in the store
pub async fn has_value<R: PathResolver>(resolver: R, key: &str) -> Result<bool> {
    PrefStore::new(resolver).contains_key(key).await
}

/// List all keys in the store, sorted
pub async fn list_keys<R: PathResolver>(resolver: R) -> Result<Vec<String>> {
    PrefStore::new(resolver).keys().await
}
