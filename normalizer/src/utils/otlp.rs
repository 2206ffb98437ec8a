//! OTLP utility functions
//!
//! Converts OTLP protobuf spans into [`SpanRecord`]s. Unlike a string-only
//! attribute map, typed values survive the conversion: arrays stay arrays and
//! key/value lists become objects, so downstream decoding sees what the
//! producer actually sent.

use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use opentelemetry_proto::tonic::trace::v1::Span;
use serde_json::Value as JsonValue;

use crate::data::{Attributes, SpanRecord};

// ============================================================================
// ATTRIBUTE EXTRACTION
// ============================================================================

/// Extract attributes from KeyValue array into an attribute map
pub fn extract_attributes(attrs: &[KeyValue]) -> Attributes {
    attrs.iter().filter_map(key_value_entry).collect()
}

/// Unset values are dropped rather than mapped to null.
fn key_value_entry(kv: &KeyValue) -> Option<(String, JsonValue)> {
    let value = kv.value.as_ref()?;
    Some((kv.key.clone(), any_value_to_json(value)))
}

/// Convert AnyValue to its JSON representation
pub fn any_value_to_json(value: &AnyValue) -> JsonValue {
    match &value.value {
        Some(any_value::Value::StringValue(s)) => JsonValue::String(s.clone()),
        Some(any_value::Value::BoolValue(b)) => JsonValue::Bool(*b),
        Some(any_value::Value::IntValue(i)) => JsonValue::from(*i),
        Some(any_value::Value::DoubleValue(d)) => serde_json::Number::from_f64(*d)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Some(any_value::Value::ArrayValue(arr)) => {
            JsonValue::Array(arr.values.iter().map(any_value_to_json).collect())
        }
        Some(any_value::Value::KvlistValue(kvlist)) => {
            JsonValue::Object(kvlist.values.iter().filter_map(key_value_entry).collect())
        }
        Some(any_value::Value::BytesValue(b)) => JsonValue::String(hex::encode(b)),
        None => JsonValue::Null,
    }
}

// ============================================================================
// SPAN CONVERSION
// ============================================================================

/// Convert a single OTLP span into a span record
pub fn span_record_from_otlp(span: &Span) -> SpanRecord {
    SpanRecord {
        trace_id: hex::encode(&span.trace_id),
        span_id: hex::encode(&span.span_id),
        parent_span_id: if span.parent_span_id.is_empty() {
            None
        } else {
            Some(hex::encode(&span.parent_span_id))
        },
        name: span.name.clone(),
        kind: span.kind,
        start_time: span.start_time_unix_nano.to_string(),
        end_time: if span.end_time_unix_nano > 0 {
            span.end_time_unix_nano.to_string()
        } else {
            String::new()
        },
        attributes: extract_attributes(&span.attributes),
    }
}

/// Flatten every span of an export request into span records, in request order
pub fn span_records_from_request(request: &ExportTraceServiceRequest) -> Vec<SpanRecord> {
    request
        .resource_spans
        .iter()
        .flat_map(|rs| rs.scope_spans.iter())
        .flat_map(|ss| ss.spans.iter())
        .map(span_record_from_otlp)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::common::v1::{ArrayValue, KeyValueList};
    use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans};
    use serde_json::json;

    fn kv(key: &str, value: any_value::Value) -> KeyValue {
        KeyValue {
            key: key.to_string(),
            value: Some(AnyValue { value: Some(value) }),
        }
    }

    #[test]
    fn test_scalar_values() {
        let attrs = extract_attributes(&[
            kv("s", any_value::Value::StringValue("text".to_string())),
            kv("b", any_value::Value::BoolValue(false)),
            kv("i", any_value::Value::IntValue(42)),
            kv("d", any_value::Value::DoubleValue(0.7)),
            kv("x", any_value::Value::BytesValue(vec![0xab, 0xcd])),
        ]);
        assert_eq!(attrs["s"], json!("text"));
        assert_eq!(attrs["b"], json!(false));
        assert_eq!(attrs["i"], json!(42));
        assert_eq!(attrs["d"], json!(0.7));
        assert_eq!(attrs["x"], json!("abcd"));
    }

    #[test]
    fn test_nested_values_keep_structure() {
        let array = any_value::Value::ArrayValue(ArrayValue {
            values: vec![AnyValue {
                value: Some(any_value::Value::StringValue("stop".to_string())),
            }],
        });
        let kvlist = any_value::Value::KvlistValue(KeyValueList {
            values: vec![kv("reasoningTokens", any_value::Value::IntValue(7))],
        });
        let attrs = extract_attributes(&[
            kv("gen_ai.response.finish_reasons", array),
            kv("meta", kvlist),
        ]);
        assert_eq!(attrs["gen_ai.response.finish_reasons"], json!(["stop"]));
        assert_eq!(attrs["meta"], json!({ "reasoningTokens": 7 }));
    }

    #[test]
    fn test_nan_double_becomes_null() {
        let attrs = extract_attributes(&[kv("d", any_value::Value::DoubleValue(f64::NAN))]);
        assert_eq!(attrs["d"], JsonValue::Null);
    }

    #[test]
    fn test_span_conversion() {
        let span = Span {
            trace_id: vec![0x01, 0x02],
            span_id: vec![0x0a],
            name: "ai.generateText.doGenerate".to_string(),
            kind: 3,
            start_time_unix_nano: 1_704_067_200_000_000_000,
            end_time_unix_nano: 0,
            attributes: vec![kv(
                "ai.model.id",
                any_value::Value::StringValue("gpt-4o".to_string()),
            )],
            ..Default::default()
        };
        let record = span_record_from_otlp(&span);
        assert_eq!(record.trace_id, "0102");
        assert_eq!(record.span_id, "0a");
        assert_eq!(record.parent_span_id, None);
        assert_eq!(record.kind, 3);
        assert_eq!(record.start_time, "1704067200000000000");
        assert_eq!(record.end_time, "");
        assert_eq!(record.attributes["ai.model.id"], json!("gpt-4o"));
    }

    #[test]
    fn test_request_flattening_preserves_order() {
        let make = |name: &str| Span {
            name: name.to_string(),
            ..Default::default()
        };
        let request = ExportTraceServiceRequest {
            resource_spans: vec![ResourceSpans {
                scope_spans: vec![ScopeSpans {
                    spans: vec![make("first"), make("second")],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };
        let names: Vec<String> = span_records_from_request(&request)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
