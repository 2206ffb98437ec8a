//! JSON utility functions

use serde_json::Value as JsonValue;

/// Converts a JsonValue to Option<String>, returning None for null values.
///
/// Prevents `JsonValue::Null` from surfacing as the string `"null"` in a
/// normalized `output` field.
pub fn json_to_opt_string(value: &JsonValue) -> Option<String> {
    if value.is_null() {
        None
    } else {
        serde_json::to_string(value).ok()
    }
}

/// True for objects and arrays, the values kept as `outputObject`.
pub fn is_structured(value: &JsonValue) -> bool {
    value.is_object() || value.is_array()
}
