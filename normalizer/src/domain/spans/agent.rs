//! Agent-orchestration framework transformer
//!
//! The framework wraps each operation in an `agent.<op>` span and records the
//! call arguments as `agent.<op>.argument.N` and the return value as
//! `agent.<op>.result`. Model details come from the
//! `agent.resolveModelConfig.result` attribute.

use serde_json::{Map, Value as JsonValue};

use crate::data::{Attributes, Message, ModelSettings, NormalizedRecord, SpanType};
use crate::utils::json::{is_structured, json_to_opt_string};

use super::decode::{
    as_count, extract_array, extract_object, field, get_first_str, get_text, get_value,
    tolerant_array, tolerant_object,
};
use super::fields::{parse_messages, parse_tool_calls, settings_from_object};
use super::keys;

/// Operations whose spans are model invocations
const GENERATION_SUFFIXES: &[&str] = &[
    ".stream",
    ".generate",
    ".streamObject",
    ".generateObject",
];

/// Spans emitted by the framework.
pub(super) fn is_agent_span(span_name: &str) -> bool {
    span_name.starts_with(keys::AGENT_PREFIX)
}

pub(super) fn classify(span_name: &str) -> SpanType {
    if GENERATION_SUFFIXES.iter().any(|s| span_name.ends_with(s)) {
        SpanType::Generation
    } else {
        SpanType::Span
    }
}

/// Extract a normalized record from a framework span.
pub(super) fn transform(span_name: &str, attrs: &Attributes) -> NormalizedRecord {
    let span_type = classify(span_name);
    tracing::trace!(span_name, span_type = %span_type, "Transforming agent span");

    let (model, settings) = extract_model_config(attrs);
    let mut record = NormalizedRecord {
        span_type,
        model,
        settings,
        input: extract_input(span_name, attrs),
        trace_name: get_first_str(attrs, &[keys::AGENTMARK_TRACE_NAME, keys::COMPONENT_NAME])
            .map(String::from),
        prompt_name: get_text(attrs, keys::AGENTMARK_PROMPT_NAME),
        props: get_text(attrs, keys::AGENTMARK_PROPS),
        session_id: get_text(attrs, keys::AGENTMARK_SESSION_ID),
        user_id: get_text(attrs, keys::AGENTMARK_USER_ID),
        ..Default::default()
    };

    if let Some(result) = extract_object(attrs, &format!("{span_name}.result")) {
        apply_result(&mut record, &result);
    }
    record
}

/// Model id and settings from the model-resolution result.
fn extract_model_config(attrs: &Attributes) -> (Option<String>, Option<ModelSettings>) {
    let Some(config) = extract_object(attrs, keys::AGENT_RESOLVE_MODEL_CONFIG_RESULT) else {
        return (None, None);
    };

    let model = field(&config, "modelId")
        .and_then(JsonValue::as_str)
        .or_else(|| field(&config, "model").and_then(JsonValue::as_str))
        .or_else(|| {
            field(&config, "model")
                .and_then(JsonValue::as_object)
                .and_then(|m| field(m, "modelId"))
                .and_then(JsonValue::as_str)
        })
        .map(String::from);

    let settings = field(&config, "settings")
        .and_then(tolerant_object)
        .and_then(|s| settings_from_object(&s));

    (model, settings)
}

/// Messages from the operation's first argument.
///
/// Falls back to the option-preparation argument only when the operation's
/// own argument is missing.
fn extract_input(span_name: &str, attrs: &Attributes) -> Option<Vec<Message>> {
    let own_key = format!("{span_name}.argument.0");
    let key = if get_value(attrs, &own_key).is_some() {
        own_key.as_str()
    } else {
        keys::AGENT_PREPARE_LLM_OPTIONS_ARG0
    };
    extract_array(attrs, key).and_then(parse_messages)
}

// ============================================================================
// RESULT
// ============================================================================

fn apply_result(record: &mut NormalizedRecord, result: &Map<String, JsonValue>) {
    if let Some(object) = field(result, "object") {
        record.output = json_to_opt_string(object);
        record.output_object = Some(object.clone());
    } else if let Some(response) = field(result, "response") {
        match response {
            JsonValue::String(s) => record.output = Some(s.clone()),
            other => {
                record.output = json_to_opt_string(other);
                if is_structured(other) {
                    record.output_object = Some(other.clone());
                }
            }
        }
    } else if let Some(text) = field(result, "text").and_then(JsonValue::as_str) {
        record.output = Some(text.to_string());
    }

    if let Some(usage) = field(result, "usage").and_then(JsonValue::as_object) {
        record.input_tokens = field(usage, "promptTokens").and_then(as_count);
        record.output_tokens = field(usage, "completionTokens").and_then(as_count);
        record.total_tokens = field(usage, "totalTokens").and_then(as_count);
    }

    record.finish_reason = field(result, "finishReason")
        .and_then(JsonValue::as_str)
        .map(String::from);
    record.tool_calls = field(result, "toolCalls")
        .and_then(tolerant_array)
        .and_then(|items| parse_tool_calls(&items, &["args", "input"]));
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
