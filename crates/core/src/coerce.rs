//! Coercion of loosely-typed tool arguments into typed values.
//!
//! Agent frameworks hand tools a JSON object whose values are whatever the
//! model produced. These helpers accept the common spellings (camelCase or
//! snake_case keys, numbers as strings, booleans as strings) and reject
//! everything else with `Error::InvalidInput`.

use serde_json::{Map, Value};

use crate::error::Error;

/// Loose argument record as received from the agent framework.
pub type JsonObject = Map<String, Value>;

/// Look up the first present, non-null key among `keys`.
fn lookup<'a>(args: &'a JsonObject, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|k| args.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
}

/// Required string field.
pub fn required_str(args: &JsonObject, keys: &[&'static str]) -> Result<String, Error> {
    optional_str(args, keys)?.ok_or_else(|| Error::invalid_input(format!("{} is required", keys[0])))
}

/// Optional string field. Numbers are not accepted as strings.
pub fn optional_str(args: &JsonObject, keys: &[&'static str]) -> Result<Option<String>, Error> {
    match lookup(args, keys) {
        None => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((key, other)) => Err(Error::invalid_input(format!("{key} must be a string, got {}", kind(other)))),
    }
}

/// Optional boolean field; accepts `true`/`false` or their string forms.
pub fn optional_bool(args: &JsonObject, keys: &[&'static str]) -> Result<Option<bool>, Error> {
    match lookup(args, keys) {
        None => Ok(None),
        Some((_, Value::Bool(b))) => Ok(Some(*b)),
        Some((key, Value::String(s))) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::invalid_input(format!("{key} must be a boolean, got {s:?}"))),
        },
        Some((key, other)) => Err(Error::invalid_input(format!("{key} must be a boolean, got {}", kind(other)))),
    }
}

/// Optional integer field, kept signed so callers can report non-positive
/// values themselves.
///
/// Accepts JSON integers, integral floats (`5.0`), and decimal digit strings.
pub fn optional_int(args: &JsonObject, keys: &[&'static str]) -> Result<Option<i64>, Error> {
    let Some((key, value)) = lookup(args, keys) else {
        return Ok(None);
    };

    let not_integer = || Error::invalid_input(format!("{key} must be an integer, got {value}"));

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if let Some(f) = n.as_f64()
                && f.fract() == 0.0
                && f.is_finite()
                && f >= i64::MIN as f64
                && f <= i64::MAX as f64
            {
                Ok(Some(f as i64))
            } else {
                Err(not_integer())
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map(Some).map_err(|_| not_integer()),
        _ => Err(not_integer()),
    }
}

/// Optional strictly positive integer field.
pub fn optional_positive(args: &JsonObject, keys: &[&'static str]) -> Result<Option<u64>, Error> {
    match optional_int(args, keys)? {
        None => Ok(None),
        Some(n) if n > 0 => Ok(Some(n as u64)),
        Some(n) => Err(Error::invalid_input(format!("{} must be a positive integer, got {n}", keys[0]))),
    }
}

/// Treat empty or whitespace-only strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
