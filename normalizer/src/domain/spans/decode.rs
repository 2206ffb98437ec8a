//! Tolerant decoding of attribute values.
//!
//! Producers send the same logical value either already structured or as a
//! JSON-encoded string. [`Encoded`] captures that at the boundary and every
//! helper here normalizes to `serde_json::Value` before field logic runs.
//! Nothing in this module panics or returns an error: malformed input is
//! reported as `None` and logged at trace level.

use std::borrow::Cow;

use serde_json::{Map, Value as JsonValue};

use crate::core::constants::LOG_PREVIEW_MAX_LEN;
use crate::data::Attributes;
use crate::utils::string::{parse_string_array, truncate_for_log};

// ============================================================================
// BOUNDARY UNION
// ============================================================================

/// Attribute value as a producer sent it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Encoded<'a> {
    /// Already-structured value (object, array, number, boolean)
    Json(&'a JsonValue),
    /// String that may or may not hold JSON
    RawString(&'a str),
}

impl<'a> Encoded<'a> {
    /// `None` for JSON null, which counts as absent.
    pub(crate) fn from_value(value: &'a JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(Self::RawString(s)),
            other => Some(Self::Json(other)),
        }
    }

    /// Parse-or-absent: strings must hold valid, non-null JSON.
    pub(crate) fn decode(self) -> Option<Cow<'a, JsonValue>> {
        match self {
            Self::Json(value) => Some(Cow::Borrowed(value)),
            Self::RawString(raw) => match serde_json::from_str::<JsonValue>(raw) {
                Ok(JsonValue::Null) => None,
                Ok(parsed) => Some(Cow::Owned(parsed)),
                Err(e) => {
                    tracing::trace!(
                        error = %e,
                        value_preview = %truncate_for_log(raw, LOG_PREVIEW_MAX_LEN),
                        "JSON decode failed, treating value as absent"
                    );
                    None
                }
            },
        }
    }

    /// Parse-or-pass-through: unparseable strings are kept as JSON strings.
    pub(crate) fn decode_or_raw(self) -> Cow<'a, JsonValue> {
        match self {
            Self::Json(value) => Cow::Borrowed(value),
            Self::RawString(raw) => match serde_json::from_str::<JsonValue>(raw) {
                Ok(parsed) => Cow::Owned(parsed),
                Err(_) => Cow::Owned(JsonValue::String(raw.to_string())),
            },
        }
    }
}

// ============================================================================
// VALUE-LEVEL HELPERS
// ============================================================================

/// Tolerant decode of a single value.
pub(crate) fn tolerant_json(value: &JsonValue) -> Option<Cow<'_, JsonValue>> {
    Encoded::from_value(value)?.decode()
}

/// Tolerant decode that additionally requires an array.
pub(crate) fn tolerant_array(value: &JsonValue) -> Option<Vec<JsonValue>> {
    match tolerant_json(value)?.into_owned() {
        JsonValue::Array(items) => Some(items),
        other => {
            tracing::trace!(found = %crate::error::json_type_name(&other), "Expected array");
            None
        }
    }
}

/// Tolerant decode that additionally requires an object.
pub(crate) fn tolerant_object(value: &JsonValue) -> Option<Map<String, JsonValue>> {
    match tolerant_json(value)?.into_owned() {
        JsonValue::Object(map) => Some(map),
        other => {
            tracing::trace!(found = %crate::error::json_type_name(&other), "Expected object");
            None
        }
    }
}

/// Walk `path` below `root` (JSON string or structured). Every step must exist.
pub(crate) fn nested_value(root: &JsonValue, path: &[&str]) -> Option<JsonValue> {
    let decoded = tolerant_json(root)?;
    let mut current: &JsonValue = decoded.as_ref();
    for step in path {
        current = current.as_object()?.get(*step)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current.clone())
    }
}

/// Nested lookup whose final value must be a non-negative integer.
///
/// Strings are not coerced: `{"openai": {"reasoningTokens": "12"}}` yields `None`.
pub(crate) fn nested_count(root: &JsonValue, path: &[&str]) -> Option<u64> {
    as_count(&nested_value(root, path)?)
}

/// Non-negative integer from a JSON number (integral floats accepted).
pub(crate) fn as_count(value: &JsonValue) -> Option<u64> {
    let JsonValue::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_u64() {
        return Some(n);
    }
    let f = number.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Finite float from a JSON number.
pub(crate) fn as_float(value: &JsonValue) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

/// Non-null value under `key` of a decoded object.
pub(crate) fn field<'a>(map: &'a Map<String, JsonValue>, key: &str) -> Option<&'a JsonValue> {
    map.get(key).filter(|v| !v.is_null())
}

// ============================================================================
// ATTRIBUTE-LEVEL HELPERS
// ============================================================================

/// Non-null attribute value.
pub(crate) fn get_value<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a JsonValue> {
    attrs.get(key).filter(|v| !v.is_null())
}

/// Presence check: null is absent, `0`, `""` and `false` are present.
pub(crate) fn is_present(attrs: &Attributes, key: &str) -> bool {
    get_value(attrs, key).is_some()
}

pub(crate) fn any_present(attrs: &Attributes, keys: &[&str]) -> bool {
    keys.iter().any(|k| is_present(attrs, k))
}

/// String attribute; non-string values are not coerced.
pub(crate) fn get_str<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    get_value(attrs, key)?.as_str()
}

/// Get first string value from attribute keys.
pub(crate) fn get_first_str<'a>(attrs: &'a Attributes, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| get_str(attrs, k))
}

/// Attribute rendered as text: strings as-is, anything else JSON-serialized.
pub(crate) fn get_text(attrs: &Attributes, key: &str) -> Option<String> {
    match get_value(attrs, key)? {
        JsonValue::String(s) => Some(s.clone()),
        other => serde_json::to_string(other).ok(),
    }
}

/// Get first text value from attribute keys.
pub(crate) fn get_first_text(attrs: &Attributes, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| get_text(attrs, k))
}

/// Tolerant-JSON attribute.
pub(crate) fn extract_json<'a>(attrs: &'a Attributes, key: &str) -> Option<Cow<'a, JsonValue>> {
    tolerant_json(get_value(attrs, key)?)
}

pub(crate) fn extract_array(attrs: &Attributes, key: &str) -> Option<Vec<JsonValue>> {
    tolerant_array(get_value(attrs, key)?)
}

pub(crate) fn extract_object(attrs: &Attributes, key: &str) -> Option<Map<String, JsonValue>> {
    tolerant_object(get_value(attrs, key)?)
}

/// Count attribute; numeric strings decode like any other JSON text.
pub(crate) fn parse_count(attrs: &Attributes, key: &str) -> Option<u64> {
    as_count(extract_json(attrs, key)?.as_ref())
}

/// First key in order whose value decodes to a count.
pub(crate) fn first_count(attrs: &Attributes, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| parse_count(attrs, k))
}

pub(crate) fn parse_float(attrs: &Attributes, key: &str) -> Option<f64> {
    as_float(extract_json(attrs, key)?.as_ref())
}

/// First key in order whose value decodes to a float.
pub(crate) fn first_float(attrs: &Attributes, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| parse_float(attrs, k))
}

/// String list from an array, a JSON-string array, or a comma-separated string.
pub(crate) fn get_string_list(attrs: &Attributes, key: &str) -> Vec<String> {
    match get_value(attrs, key) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Some(JsonValue::String(s)) => parse_string_array(s),
        _ => Vec::new(),
    }
}

/// Any attribute key starting with `prefix`.
pub(crate) fn has_key_prefix(attrs: &Attributes, prefix: &str) -> bool {
    attrs.keys().any(|k| k.starts_with(prefix))
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
