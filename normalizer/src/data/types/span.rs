//! Input span record
//!
//! The unit handed over by the collection pipeline: identity, name, timing and
//! a flat attribute map whose values keep whatever encoding the producer used.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::utils::time::parse_nanos;

/// Flat attribute map keyed by dotted attribute names.
pub type Attributes = HashMap<String, JsonValue>;

/// Raw span as received from the collection pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub trace_id: String,
    pub span_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: i32,
    /// Nanoseconds since the Unix epoch, as a decimal string
    #[serde(default, deserialize_with = "deserialize_nanos")]
    pub start_time: String,
    /// Nanoseconds since the Unix epoch, as a decimal string
    #[serde(default, deserialize_with = "deserialize_nanos")]
    pub end_time: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SpanRecord {
    pub fn new(
        trace_id: impl Into<String>,
        span_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        parse_nanos(&self.start_time)
    }

    pub fn end_datetime(&self) -> Option<DateTime<Utc>> {
        parse_nanos(&self.end_time)
    }
}

/// Producers emit timestamps as large-integer strings; numbers are accepted too.
fn deserialize_nanos<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected nanosecond timestamp string, got {other}"
        ))),
    }
}
