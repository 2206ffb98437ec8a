//! Error type for the normalizer
//!
//! Span decoding never fails: malformed attributes only drop the affected
//! field. The errors below cover caller contract violations and configuration.

use thiserror::Error;

/// Unified error type for normalizer operations
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The value handed to the normalizer is not a span record at all
    #[error("Invalid span record: expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A span object is missing required fields or has ill-typed ones
    #[error("Invalid span record: {0}")]
    InvalidSpan(#[source] serde_json::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[source] serde_json::Error),
}

/// JSON type name used in error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
