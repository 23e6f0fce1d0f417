//! Field accessors for hand-read JSON objects.
//!
//! Each accessor names the missing or mistyped key in its error so content
//! authors can find the problem.

use serde_json::{Map, Value};

use crate::error::{ContentError, ContentResult};
use crate::id::ResourceId;

/// A JSON object.
pub type JsonObject = Map<String, Value>;

/// Interpret a value as an object.
pub fn as_object<'a>(value: &'a Value, what: &str) -> ContentResult<&'a JsonObject> {
    value
        .as_object()
        .ok_or_else(|| ContentError::syntax(format!("expected {what} to be an object")))
}

/// Required object field.
pub fn get_object<'a>(json: &'a JsonObject, key: &str) -> ContentResult<&'a JsonObject> {
    match json.get(key) {
        Some(value) => as_object(value, key),
        None => Err(missing(key)),
    }
}

/// Required string field.
pub fn get_str<'a>(json: &'a JsonObject, key: &str) -> ContentResult<&'a str> {
    match json.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(mistyped(key, "a string", other)),
        None => Err(missing(key)),
    }
}

/// Optional string field with a default.
pub fn get_str_or<'a>(json: &'a JsonObject, key: &str, default: &'a str) -> ContentResult<&'a str> {
    if json.contains_key(key) {
        get_str(json, key)
    } else {
        Ok(default)
    }
}

/// Required identifier field.
pub fn get_id(json: &JsonObject, key: &str) -> ContentResult<ResourceId> {
    Ok(ResourceId::parse(get_str(json, key)?)?)
}

/// Optional `i32` field with a default.
pub fn get_i32_or(json: &JsonObject, key: &str, default: i32) -> ContentResult<i32> {
    match json.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| mistyped(key, "a 32-bit integer", value)),
    }
}

/// Optional `f32` field with a default.
pub fn get_f32_or(json: &JsonObject, key: &str, default: f32) -> ContentResult<f32> {
    match json.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| mistyped(key, "a number", value)),
    }
}

/// Optional boolean field with a default.
pub fn get_bool_or(json: &JsonObject, key: &str, default: bool) -> ContentResult<bool> {
    match json.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(mistyped(key, "a boolean", other)),
    }
}

/// Required array field, each element parsed by `parse` in order.
pub fn parse_list<T>(
    json: &JsonObject,
    key: &str,
    mut parse: impl FnMut(&Value) -> ContentResult<T>,
) -> ContentResult<Vec<T>> {
    match json.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                parse(item).map_err(|e| match e {
                    ContentError::Syntax(msg) => {
                        ContentError::Syntax(format!("{key}[{i}]: {msg}"))
                    }
                    other => other,
                })
            })
            .collect(),
        Some(other) => Err(mistyped(key, "an array", other)),
        None => Err(missing(key)),
    }
}

fn missing(key: &str) -> ContentError {
    ContentError::syntax(format!("missing \"{key}\""))
}

fn mistyped(key: &str, expected: &str, found: &Value) -> ContentError {
    ContentError::syntax(format!("expected \"{key}\" to be {expected}, found {found}"))
}
