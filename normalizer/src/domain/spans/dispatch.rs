//! Transformer selection
//!
//! Producers do not self-identify, so selection inspects the same signals
//! each transformer classifies with. Transformers are checked in
//! [`DISPATCH_ORDER`]; the first enabled match handles the span.

use crate::core::config::{NormalizerConfig, SourcesConfig};
use crate::data::{Attributes, NormalizedRecord, SpanType, Transformer};

use super::{agent, vercel_ai};

/// Agent spans may also carry `ai.*` keys, so the name-based family goes first.
const DISPATCH_ORDER: &[Transformer] = &[Transformer::Agent, Transformer::VercelAi];

impl Transformer {
    /// Whether the span carries this transformer's family signals
    pub fn matches(self, span_name: &str, attrs: &Attributes) -> bool {
        match self {
            Self::Agent => agent::is_agent_span(span_name),
            Self::VercelAi => vercel_ai::is_vercel_ai_span(span_name, attrs),
        }
    }

    pub fn classify(self, span_name: &str, attrs: &Attributes) -> SpanType {
        match self {
            Self::Agent => agent::classify(span_name),
            Self::VercelAi => vercel_ai::classify(span_name, attrs),
        }
    }

    /// Extract the normalized record. Never fails; bad fields are omitted.
    pub fn transform(
        self,
        span_name: &str,
        attrs: &Attributes,
        config: &NormalizerConfig,
    ) -> NormalizedRecord {
        match self {
            Self::Agent => agent::transform(span_name, attrs),
            Self::VercelAi => vercel_ai::transform(span_name, attrs, &config.reasoning_providers),
        }
    }
}

/// Pick the transformer for a span, skipping disabled ones.
pub fn select_transformer(
    span_name: &str,
    attrs: &Attributes,
    sources: &SourcesConfig,
) -> Option<Transformer> {
    let selected = DISPATCH_ORDER
        .iter()
        .copied()
        .filter(|t| sources.is_enabled(*t))
        .find(|t| t.matches(span_name, attrs));

    match selected {
        Some(transformer) => {
            tracing::debug!(span_name, transformer = %transformer, "Selected transformer");
        }
        None => {
            tracing::debug!(span_name, "No transformer matched, passing span through");
        }
    }
    selected
}

/// Select and run a transformer. Unmatched spans become a bare `SPAN` record.
pub fn transform_span(
    span_name: &str,
    attrs: &Attributes,
    config: &NormalizerConfig,
) -> (Option<Transformer>, NormalizedRecord) {
    match select_transformer(span_name, attrs, &config.sources) {
        Some(transformer) => (
            Some(transformer),
            transformer.transform(span_name, attrs, config),
        ),
        None => (None, NormalizedRecord::default()),
    }
}
