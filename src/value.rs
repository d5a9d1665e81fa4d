//! The value type exchanged between the store and its callers

use std::fmt;

/// A single preference value
///
/// Preferences are flat: the only container is a list of strings.
///
/// # Example
///
/// ```
/// use prefs_store::PrefValue;
///
/// let theme = PrefValue::from("dark");
/// assert_eq!(theme.as_str(), Some("dark"));
///
/// let recent = PrefValue::from(vec!["a.txt".to_string(), "b.txt".to_string()]);
/// assert_eq!(recent.as_string_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PrefValue {
    Null,
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    StringList(Vec<String>),
}

/// The declared kind of a [`PrefValue`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    StringList,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "a boolean",
            ValueKind::Int => "a 32-bit integer",
            ValueKind::Double => "a number",
            ValueKind::String => "a string",
            ValueKind::StringList => "a list of strings",
        };
        f.write_str(name)
    }
}

impl PrefValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            PrefValue::Null => ValueKind::Null,
            PrefValue::Bool(_) => ValueKind::Bool,
            PrefValue::Int(_) => ValueKind::Int,
            PrefValue::Double(_) => ValueKind::Double,
            PrefValue::String(_) => ValueKind::String,
            PrefValue::StringList(_) => ValueKind::StringList,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PrefValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a double; integers widen losslessly
    pub fn as_double(&self) -> Option<f64> {
        match self {
            PrefValue::Double(d) => Some(*d),
            PrefValue::Int(i) => Some(f64::from(*i)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            PrefValue::StringList(list) => Some(list),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        PrefValue::Int(value)
    }
}

impl From<f64> for PrefValue {
    fn from(value: f64) -> Self {
        PrefValue::Double(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::String(value)
    }
}

impl From<Vec<String>> for PrefValue {
    fn from(value: Vec<String>) -> Self {
        PrefValue::StringList(value)
    }
}
