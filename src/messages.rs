//! Message types for the request handler

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::codec;
use crate::error::{Result, StoreError};
use crate::value::{PrefValue, ValueKind};

/// A named operation with its arguments, as sent by a caller
///
/// Arguments are a JSON object holding `key` and, for setters, `value`.
///
/// # Example
///
/// ```
/// use prefs_store::MethodCall;
/// use serde_json::json;
///
/// let call: MethodCall =
///     serde_json::from_str(r#"{"method":"setInt","arguments":{"key":"count","value":5}}"#)
///         .unwrap();
/// assert_eq!(call, MethodCall::with_arguments("setInt", json!({ "key": "count", "value": 5 })));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl MethodCall {
    /// Create a call without arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments: Some(arguments),
        }
    }

    /// Look up a named argument; non-object arguments hold nothing
    fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.as_ref()?.as_object()?.get(name)
    }

    /// The `key` argument, empty when absent
    fn key(&self) -> Result<String> {
        match self.argument("key") {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(key)) => Ok(key.clone()),
            Some(_) => Err(StoreError::InvalidArgument {
                name: "key",
                expected: ValueKind::String,
            }),
        }
    }
}

/// Typed input that applications use to drive the handler
///
/// # Example
///
/// ```
/// use prefs_store::{PrefValue, PrefsInput};
///
/// let input = PrefsInput::set_int("launch_count", 3);
/// assert_eq!(
///     input,
///     PrefsInput::Set { key: "launch_count".to_string(), value: PrefValue::Int(3) }
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PrefsInput {
    /// Read every stored preference
    GetAll,
    /// Store a value under a key
    Set { key: String, value: PrefValue },
    /// Delete a key
    Remove { key: String },
    /// Delete everything
    Clear,
}

impl PrefsInput {
    pub fn set_int(key: impl Into<String>, value: i32) -> Self {
        Self::set(key, PrefValue::Int(value))
    }

    pub fn set_double(key: impl Into<String>, value: f64) -> Self {
        Self::set(key, PrefValue::Double(value))
    }

    pub fn set_bool(key: impl Into<String>, value: bool) -> Self {
        Self::set(key, PrefValue::Bool(value))
    }

    pub fn set_string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::set(key, PrefValue::String(value.into()))
    }

    pub fn set_string_list<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::set(
            key,
            PrefValue::StringList(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    fn set(key: impl Into<String>, value: PrefValue) -> Self {
        Self::Set {
            key: key.into(),
            value,
        }
    }
}

impl TryFrom<MethodCall> for PrefsInput {
    type Error = StoreError;

    /// Decode a named operation
    ///
    /// Setters build the value kind their name declares; a missing `value`
    /// falls back to that kind's default and a missing `key` to `""`.
    fn try_from(call: MethodCall) -> Result<Self> {
        let kind = match call.method.as_str() {
            "getAll" => return Ok(PrefsInput::GetAll),
            "clear" => return Ok(PrefsInput::Clear),
            "remove" => return Ok(PrefsInput::Remove { key: call.key()? }),
            "setInt" => ValueKind::Int,
            "setString" => ValueKind::String,
            "setDouble" => ValueKind::Double,
            "setBool" => ValueKind::Bool,
            "setStringList" => ValueKind::StringList,
            _ => {
                return Err(StoreError::UnsupportedOperation {
                    method: call.method,
                });
            }
        };

        Ok(PrefsInput::Set {
            key: call.key()?,
            value: codec::decode_argument("value", call.argument("value"), kind)?,
        })
    }
}

/// Output messages emitted by the handler
///
/// Serialized with a `type` tag, e.g. `{"type":"set","key":"theme"}`.
///
/// # Example
///
/// ```ignore
/// use prefs_store::PrefsOutput;
///
/// fn handle_output(output: PrefsOutput) {
///     match output {
///         PrefsOutput::All { values } => {
///             // Use the values
///         }
///         PrefsOutput::Error { message } => {
///             eprintln!("Preferences unavailable: {}", message);
///         }
///         _ => {}
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrefsOutput {
    /// Every stored preference
    All { values: BTreeMap<String, PrefValue> },
    /// A value was stored and persisted
    Set { key: String },
    /// A key was removed (or was already absent) and the document persisted
    Removed { key: String, existed: bool },
    /// The document was emptied and persisted
    Cleared,
    /// The operation name is unknown
    NotImplemented { method: String },
    /// The operation failed
    Error { message: String },
}

impl PrefsOutput {
    /// Look up a value in an [`PrefsOutput::All`] output
    pub fn value(&self, key: &str) -> Option<&PrefValue> {
        match self {
            PrefsOutput::All { values } => values.get(key),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PrefsOutput::Error { .. })
    }
}
