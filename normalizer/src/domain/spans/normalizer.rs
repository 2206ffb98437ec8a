//! Normalizer facade: dispatch plus span identity and timing.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::core::config::NormalizerConfig;
use crate::data::{NormalizedSpan, SpanRecord};
use crate::error::{NormalizeError, json_type_name};
use crate::utils::time::duration_ms;

use super::dispatch::transform_span;

/// Stateless span normalizer.
///
/// Holds only configuration, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SpanNormalizer {
    config: NormalizerConfig,
}

impl SpanNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize one span record.
    pub fn normalize(&self, span: &SpanRecord) -> NormalizedSpan {
        let (source, record) = transform_span(&span.name, &span.attributes, &self.config);

        let start_time = span.start_datetime();
        let end_time = span.end_datetime();
        let duration = match (start_time, end_time) {
            (Some(start), Some(end)) => duration_ms(start, end),
            _ => None,
        };

        NormalizedSpan {
            trace_id: span.trace_id.clone(),
            span_id: span.span_id.clone(),
            parent_span_id: span.parent_span_id.clone(),
            name: span.name.clone(),
            kind: span.kind,
            start_time,
            end_time,
            duration_ms: duration,
            source,
            record,
        }
    }

    /// Normalize spans independently, preserving order.
    pub fn normalize_batch(&self, spans: &[SpanRecord]) -> Vec<NormalizedSpan> {
        let normalized: Vec<NormalizedSpan> = spans.iter().map(|s| self.normalize(s)).collect();
        tracing::debug!(count = normalized.len(), "Normalized span batch");
        normalized
    }

    /// Normalize an untyped JSON span record.
    ///
    /// Only a value that is not a span record at all is an error; bad
    /// attributes inside a valid record just drop the affected fields.
    pub fn normalize_value(&self, value: &JsonValue) -> Result<NormalizedSpan, NormalizeError> {
        if !value.is_object() {
            return Err(NormalizeError::NotAnObject {
                found: json_type_name(value),
            });
        }
        let span = SpanRecord::deserialize(value).map_err(NormalizeError::InvalidSpan)?;
        Ok(self.normalize(&span))
    }
}

/// Normalize a span with the default configuration.
pub fn normalize_span(span: &SpanRecord) -> NormalizedSpan {
    SpanNormalizer::default().normalize(span)
}
