//! Preference Store
//!
//! A simple JSON-backed preference store that persists typed values to disk.
//! All preferences live in a single JSON object in one file.
//!
//! # Features
//!
//! - Typed values: null, bool, 32-bit int, double, string, list of strings
//! - Whole-file rewrite on every change, finished before the call returns
//! - Self-healing: a missing or corrupt file becomes an empty store
//! - Named operations (`getAll`, `setInt`, ...) via [`PrefsHandler`]
//! - Async file operations
//!
//! # Example
//!
//! ```no_run
//! use prefs_store::{AppDataDir, AppName, MethodCall, PrefsHandler};
//! use serde_json::json;
//!
//! # async fn run() {
//! let app_name = AppName::new("com", "example", "myapp");
//! let mut handler = PrefsHandler::new(AppDataDir::new(app_name));
//!
//! // Set a value
//! let call = MethodCall::with_arguments("setString", json!({ "key": "theme", "value": "dark" }));
//! handler.handle(call).await;
//!
//! // Read everything back
//! let output = handler.handle(MethodCall::new("getAll")).await;
//! if let Some(theme) = output.value("theme") {
//!     println!("theme = {:?}", theme);
//! }
//! # }
//! ```

pub mod codec;
mod error;
mod handler;
mod helpers;
mod messages;
mod path;
mod store;
mod value;

pub use error::{Result, StoreError};
pub use handler::PrefsHandler;
pub use helpers::{delete_value, has_value, list_keys, read_all, read_value, write_value};
pub use messages::{MethodCall, PrefsInput, PrefsOutput};
pub use path::{AppDataDir, AppName, DEFAULT_FILE_NAME, DocumentsDir, FixedPath, PathResolver};
pub use store::{Document, PrefStore};
pub use value::{PrefValue, ValueKind};
