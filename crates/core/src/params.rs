//! Helpers for reading engine parameters out of a JSON object.
//!
//! Counts are forgiving: a missing key or a value of the wrong type yields
//! the default. Colors are stricter because a typo in a color should
//! not silently render the default colors.

use serde_json::Value;

use crate::color::Srgb;
use crate::error::EngineError;

/// `params[name]` as `usize`, or `default` unless it is a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` parsed as a hex color, or `default` if the key is absent.
///
/// Returns `EngineError::ParamTypeMismatch` when the value is not a string
/// and `EngineError::InvalidColor` when the string does not parse.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, EngineError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => Srgb::from_hex(s),
        Some(other) => Err(EngineError::ParamTypeMismatch {
            name: name.to_string(),
            expected: "string".to_string(),
            got: json_type_name(other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
