//! Request handler translating named operations into store calls

use serde_json::json;

use crate::error::StoreError;
use crate::messages::{MethodCall, PrefsInput, PrefsOutput};
use crate::path::PathResolver;
use crate::store::PrefStore;

/// Handler that owns a [`PrefStore`] and answers operations against it
///
/// Every operation finishes, including its file write, before an output is
/// produced. Failures become [`PrefsOutput::Error`] or
/// [`PrefsOutput::NotImplemented`]; nothing panics across this boundary.
///
/// # Example
///
/// ```no_run
/// use prefs_store::{AppDataDir, AppName, PrefsHandler, PrefsInput, PrefsOutput};
///
/// # async fn run() {
/// let app_name = AppName::new("com", "example", "myapp");
/// let mut handler = PrefsHandler::new(AppDataDir::new(app_name));
///
/// let output = handler.update(PrefsInput::set_bool("onboarded", true)).await;
/// assert!(matches!(output, PrefsOutput::Set { .. }));
/// # }
/// ```
#[derive(Debug)]
pub struct PrefsHandler<R> {
    store: PrefStore<R>,
}

impl<R: PathResolver> PrefsHandler<R> {
    pub fn new(resolver: R) -> Self {
        Self::from_store(PrefStore::new(resolver))
    }

    pub fn from_store(store: PrefStore<R>) -> Self {
        Self { store }
    }

    pub fn store(&mut self) -> &mut PrefStore<R> {
        &mut self.store
    }

    pub fn into_store(self) -> PrefStore<R> {
        self.store
    }

    /// Decode and run a named operation
    pub async fn handle(&mut self, call: MethodCall) -> PrefsOutput {
        match PrefsInput::try_from(call) {
            Ok(input) => self.update(input).await,
            Err(StoreError::UnsupportedOperation { method }) => {
                tracing::debug!(method = %method, "Unknown preference operation");
                PrefsOutput::NotImplemented { method }
            }
            Err(err) => PrefsOutput::Error {
                message: err.to_string(),
            },
        }
    }

    /// Run a typed operation
    pub async fn update(&mut self, input: PrefsInput) -> PrefsOutput {
        let result = match input {
            PrefsInput::GetAll => self
                .store
                .get_all()
                .await
                .map(|values| PrefsOutput::All { values }),

            PrefsInput::Set { key, value } => self
                .store
                .set_value(key.clone(), value)
                .await
                .map(|()| PrefsOutput::Set { key }),

            PrefsInput::Remove { key } => self
                .store
                .remove(&key)
                .await
                .map(|existed| PrefsOutput::Removed { key, existed }),

            PrefsInput::Clear => self.store.clear().await.map(|()| PrefsOutput::Cleared),
        };

        result.unwrap_or_else(|err| {
            tracing::warn!(%err, "Preference operation failed");
            PrefsOutput::Error {
                message: err.to_string(),
            }
        })
    }

    /// Handle a JSON-encoded [`MethodCall`] and answer with a JSON-encoded
    /// [`PrefsOutput`]
    pub async fn handle_json(&mut self, request: &str) -> String {
        let output = match serde_json::from_str::<MethodCall>(request) {
            Ok(call) => self.handle(call).await,
            Err(err) => PrefsOutput::Error {
                message: format!("Invalid request: {}", err),
            },
        };

        serde_json::to_string(&output).unwrap_or_else(|err| {
            json!({ "type": "error", "message": format!("Failed to encode response: {}", err) })
                .to_string()
        })
    }
}
