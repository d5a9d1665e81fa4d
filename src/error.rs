//! Error types for the preference store

use std::path::PathBuf;
use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while loading, mutating or persisting preferences
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but does not hold a JSON object.
    ///
    /// Recovered by the store itself; callers of the store never see it.
    #[error("Malformed preference document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// The backing file exists but could not be read
    #[error("Failed to read preferences from {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be written
    #[error("Failed to persist preferences to {}: {source}", .path.display())]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("Failed to serialize preferences: {0}")]
    Encode(#[source] serde_json::Error),

    /// A JSON value has no preference value counterpart
    #[error("Cannot represent a JSON {kind} as a preference value")]
    UnrepresentableValue { kind: &'static str },

    /// An operation name the handler does not know
    #[error("Operation '{method}' is not implemented")]
    UnsupportedOperation { method: String },

    /// An argument was supplied with the wrong type
    #[error("Argument '{name}' must be {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: ValueKind,
    },

    /// No directory could be found to hold the backing file
    #[error("No storage directory available on this platform")]
    NoStorageDir,
}

impl StoreError {
    /// Check if this error came from writing the backing file
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, StoreError::PersistenceFailed { .. })
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, StoreError>;
