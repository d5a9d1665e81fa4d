//! Conversion between [`PrefValue`] and the JSON values held in the document

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::{Result, StoreError};
use crate::value::{PrefValue, ValueKind};

/// Encode a preference value as JSON
///
/// Non-finite doubles have no JSON form and are written as `null`.
pub fn encode(value: &PrefValue) -> Value {
    match value {
        PrefValue::Null => Value::Null,
        PrefValue::Bool(b) => Value::Bool(*b),
        PrefValue::Int(i) => Value::Number((*i).into()),
        PrefValue::Double(d) => Number::from_f64(*d)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        PrefValue::String(s) => Value::String(s.clone()),
        PrefValue::StringList(list) => {
            Value::Array(list.iter().cloned().map(Value::String).collect())
        }
    }
}

/// Decode a stored JSON value, failing on shapes a preference cannot hold
///
/// Integral numbers that fit in 32 bits become [`PrefValue::Int`], every other
/// number becomes [`PrefValue::Double`]. Arrays are decoded element by element
/// and are only representable when every element is a string.
///
/// # Errors
///
/// Returns [`StoreError::UnrepresentableValue`] for objects and for arrays
/// holding anything but strings.
pub fn try_decode(value: &Value) -> Result<PrefValue> {
    match value {
        Value::Null => Ok(PrefValue::Null),
        Value::Bool(b) => Ok(PrefValue::Bool(*b)),
        Value::Number(n) => Ok(decode_number(n)),
        Value::String(s) => Ok(PrefValue::String(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match try_decode(item)? {
                PrefValue::String(s) => Ok(s),
                other => Err(StoreError::UnrepresentableValue {
                    kind: element_kind(&other),
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(PrefValue::StringList),
        Value::Object(_) => Err(StoreError::UnrepresentableValue { kind: "object" }),
    }
}

/// Decode a stored JSON value, coercing unrepresentable shapes to null
pub fn decode(value: &Value) -> PrefValue {
    try_decode(value).unwrap_or_else(|err| {
        tracing::debug!(%err, "Coercing stored value to null");
        PrefValue::Null
    })
}

fn decode_number(n: &Number) -> PrefValue {
    if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
        return PrefValue::Int(i);
    }
    // as_f64 only fails with arbitrary_precision, which is not enabled
    PrefValue::Double(n.as_f64().unwrap_or_default())
}

fn element_kind(value: &PrefValue) -> &'static str {
    match value {
        PrefValue::Null => "null list element",
        PrefValue::Bool(_) => "boolean list element",
        PrefValue::Int(_) | PrefValue::Double(_) => "number list element",
        PrefValue::String(_) => "string list element",
        PrefValue::StringList(_) => "nested list",
    }
}

/// Decode an operation argument of a declared kind
///
/// An absent or `null` argument yields the kind's default: `0`, `0.0`,
/// `false`, `""` or an empty list.
///
/// # Errors
///
/// Returns [`StoreError::InvalidArgument`] when the argument is present but
/// has the wrong JSON type.
pub fn decode_argument(
    name: &'static str,
    value: Option<&Value>,
    kind: ValueKind,
) -> Result<PrefValue> {
    let value = match value {
        None | Some(Value::Null) => return Ok(default_for(kind)),
        Some(value) => value,
    };

    let invalid = || StoreError::InvalidArgument {
        name,
        expected: kind,
    };

    match kind {
        ValueKind::Null => Ok(PrefValue::Null),
        ValueKind::Bool => value.as_bool().map(PrefValue::Bool).ok_or_else(invalid),
        ValueKind::Int => value
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(PrefValue::Int)
            .ok_or_else(invalid),
        ValueKind::Double => value.as_f64().map(PrefValue::Double).ok_or_else(invalid),
        ValueKind::String => value
            .as_str()
            .map(|s| PrefValue::String(s.to_string()))
            .ok_or_else(invalid),
        ValueKind::StringList => value
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .map(PrefValue::StringList)
            .ok_or_else(invalid),
    }
}

fn default_for(kind: ValueKind) -> PrefValue {
    match kind {
        ValueKind::Null => PrefValue::Null,
        ValueKind::Bool => PrefValue::Bool(false),
        ValueKind::Int => PrefValue::Int(0),
        ValueKind::Double => PrefValue::Double(0.0),
        ValueKind::String => PrefValue::String(String::new()),
        ValueKind::StringList => PrefValue::StringList(Vec::new()),
    }
}

impl Serialize for PrefValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrefValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        try_decode(&value).map_err(serde::de::Error::custom)
    }
}
