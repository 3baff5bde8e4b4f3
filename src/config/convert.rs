//! Conversion of leaf values into caller types.
//!
//! Each converter is a plain function matching [`Converter`], so callers can
//! pass `convert::string`, `convert::integer`, or `convert::deserialize::<T>`.

use serde::de::DeserializeOwned;
use toml::Value;

use super::ConvertError;

/// Converts a leaf value into `T`.
pub type Converter<T> = fn(&Value) -> Result<T, ConvertError>;

/// Strings as-is; other scalars rendered as text.
pub fn string(value: &Value) -> Result<String, ConvertError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(format!("{f:?}")),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(mismatch("string", value)),
    }
}

pub fn boolean(value: &Value) -> Result<bool, ConvertError> {
    value.as_bool().ok_or_else(|| mismatch("boolean", value))
}

pub fn integer(value: &Value) -> Result<i64, ConvertError> {
    value.as_integer().ok_or_else(|| mismatch("integer", value))
}

/// Largest integer magnitude an `f64` holds exactly.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

/// Floats, with integers widened.
///
/// Integers beyond +/- 2^53 would lose precision and are rejected.
pub fn float(value: &Value) -> Result<f64, ConvertError> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Integer(i) if (-MAX_EXACT_FLOAT_INT..=MAX_EXACT_FLOAT_INT).contains(i) => {
            Ok(*i as f64)
        }
        Value::Integer(i) => Err(ConvertError::InexactFloat(*i)),
        _ => Err(mismatch("float", value)),
    }
}

pub fn string_list(value: &Value) -> Result<Vec<String>, ConvertError> {
    let items = value.as_array().ok_or_else(|| mismatch("array", value))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| mismatch("array of strings", item))
        })
        .collect()
}

/// An owned copy of the raw value.
pub fn value(value: &Value) -> Result<Value, ConvertError> {
    Ok(value.clone())
}

/// Deserializes the value with serde.
pub fn deserialize<T: DeserializeOwned>(value: &Value) -> Result<T, ConvertError> {
    Ok(value.clone().try_into()?)
}

fn mismatch(expected: &'static str, found: &Value) -> ConvertError {
    ConvertError::Type {
        expected,
        found: found.type_str(),
    }
}
