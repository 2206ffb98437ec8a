//! Vercel AI SDK transformer (v4 and v5 attribute schemas)
//!
//! Version is detected once per span and selects a [`VersionKeys`] table.
//! Model, input, settings and telemetry metadata share keys across versions;
//! output, usage, tool calls and finish reason do not. `unknown` spans use the
//! v5 table since its fallback chains start with the OTel GenAI keys.

use serde_json::Value as JsonValue;

use crate::data::{Attributes, Message, ModelSettings, NormalizedRecord, SchemaVersion, SpanType};
use crate::utils::json::{is_structured, json_to_opt_string};

use super::decode::{
    Encoded, any_present, extract_array, extract_object, first_count, first_float,
    get_first_str, get_first_text, get_string_list, get_text, get_value, has_key_prefix,
    nested_count,
};
use super::fields::{messages_from_prompt, parse_messages, parse_tool_calls};
use super::keys;
use super::version::detect_version;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Name fragments of provider-call spans (`ai.generateText.doGenerate`)
const PROVIDER_CALL_MARKERS: &[&str] = &[".doGenerate", ".doStream"];

/// Streaming operation prefixes, which carry the model call themselves
const STREAMING_PREFIXES: &[&str] = &["ai.streamText.", "ai.streamObject."];

/// Span carries a model key, an `ai.` name, or any `ai.`-prefixed attribute.
pub(super) fn is_vercel_ai_span(span_name: &str, attrs: &Attributes) -> bool {
    any_present(attrs, keys::MODEL_KEYS)
        || span_name.starts_with(keys::AI_PREFIX)
        || has_key_prefix(attrs, keys::AI_PREFIX)
}

/// GENERATION iff a model is discoverable and the name is a model call.
pub(super) fn classify(span_name: &str, attrs: &Attributes) -> SpanType {
    let has_model = any_present(attrs, keys::MODEL_KEYS);
    let is_model_call = PROVIDER_CALL_MARKERS
        .iter()
        .any(|m| span_name.contains(m))
        || STREAMING_PREFIXES.iter().any(|p| span_name.starts_with(p));

    if has_model && is_model_call {
        SpanType::Generation
    } else {
        SpanType::Span
    }
}

// ============================================================================
// VERSION TABLES
// ============================================================================

/// Count key with fallbacks, first decodable value wins.
struct TokenConfig {
    primary: &'static str,
    fallbacks: &'static [&'static str],
}

impl TokenConfig {
    const fn new(primary: &'static str, fallbacks: &'static [&'static str]) -> Self {
        Self { primary, fallbacks }
    }

    fn extract(&self, attrs: &Attributes) -> Option<u64> {
        first_count(attrs, &[self.primary]).or_else(|| first_count(attrs, self.fallbacks))
    }
}

/// Attribute keys that differ between schema versions.
struct VersionKeys {
    text: &'static str,
    object: &'static str,
    tool_calls: &'static str,
    /// Tool call entry fields holding arguments, in priority order
    tool_call_args: &'static [&'static str],
    finish_reason: &'static [&'static str],
    input_tokens: TokenConfig,
    output_tokens: TokenConfig,
    total_tokens: Option<TokenConfig>,
    reasoning_tokens: Option<TokenConfig>,
    /// Provider metadata searched for `<provider>.reasoningTokens`
    provider_metadata: Option<&'static str>,
}

static V5_TABLE: VersionKeys = VersionKeys {
    text: keys::AI_RESPONSE_TEXT,
    object: keys::AI_RESPONSE_OBJECT,
    tool_calls: keys::AI_RESPONSE_TOOL_CALLS,
    tool_call_args: &["input", "args"],
    finish_reason: &[keys::AI_RESPONSE_FINISH_REASON],
    input_tokens: TokenConfig::new(
        keys::GEN_AI_USAGE_INPUT_TOKENS,
        &[keys::AI_USAGE_INPUT_TOKENS, keys::AI_USAGE_PROMPT_TOKENS],
    ),
    output_tokens: TokenConfig::new(
        keys::GEN_AI_USAGE_OUTPUT_TOKENS,
        &[keys::AI_USAGE_OUTPUT_TOKENS, keys::AI_USAGE_COMPLETION_TOKENS],
    ),
    total_tokens: Some(TokenConfig::new(
        keys::GEN_AI_USAGE_TOTAL_TOKENS,
        &[keys::AI_USAGE_TOTAL_TOKENS],
    )),
    reasoning_tokens: Some(TokenConfig::new(
        keys::GEN_AI_USAGE_REASONING_TOKENS,
        &[keys::AI_USAGE_REASONING_TOKENS],
    )),
    provider_metadata: Some(keys::AI_RESPONSE_PROVIDER_METADATA),
};

static V4_TABLE: VersionKeys = VersionKeys {
    text: keys::AI_RESULT_TEXT,
    object: keys::AI_RESULT_OBJECT,
    tool_calls: keys::AI_RESULT_TOOL_CALLS,
    tool_call_args: &["args"],
    finish_reason: &[keys::AI_RESULT_FINISH_REASON, keys::AI_FINISH_REASON],
    input_tokens: TokenConfig::new(keys::AI_USAGE_PROMPT_TOKENS, &[]),
    output_tokens: TokenConfig::new(keys::AI_USAGE_COMPLETION_TOKENS, &[]),
    total_tokens: None,
    reasoning_tokens: None,
    provider_metadata: None,
};

fn keys_for(version: SchemaVersion) -> &'static VersionKeys {
    match version {
        SchemaVersion::V4 => &V4_TABLE,
        SchemaVersion::V5 | SchemaVersion::Unknown => &V5_TABLE,
    }
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Extract a normalized record from a Vercel AI SDK span.
pub(super) fn transform(
    span_name: &str,
    attrs: &Attributes,
    reasoning_providers: &[String],
) -> NormalizedRecord {
    let version = detect_version(attrs);
    let version_keys = keys_for(version);
    let span_type = classify(span_name, attrs);

    tracing::trace!(
        span_name,
        version = %version,
        span_type = %span_type,
        "Transforming Vercel AI span"
    );

    let (output, output_object) = extract_output(attrs, version_keys);

    let mut record = NormalizedRecord {
        span_type,
        model: get_first_str(attrs, &[keys::AI_MODEL_ID, keys::GEN_AI_REQUEST_MODEL])
            .map(String::from),
        input: extract_input(attrs),
        output,
        output_object,
        tool_calls: extract_array(attrs, version_keys.tool_calls)
            .and_then(|items| parse_tool_calls(&items, version_keys.tool_call_args)),
        finish_reason: extract_finish_reason(attrs, version_keys),
        settings: extract_settings(attrs),
        input_tokens: version_keys.input_tokens.extract(attrs),
        output_tokens: version_keys.output_tokens.extract(attrs),
        total_tokens: version_keys
            .total_tokens
            .as_ref()
            .and_then(|t| t.extract(attrs)),
        reasoning_tokens: extract_reasoning_tokens(attrs, version_keys, reasoning_providers),
        ..Default::default()
    };
    apply_telemetry_metadata(&mut record, attrs);
    record
}

fn extract_input(attrs: &Attributes) -> Option<Vec<Message>> {
    extract_array(attrs, keys::AI_PROMPT_MESSAGES)
        .and_then(parse_messages)
        .or_else(|| extract_object(attrs, keys::AI_PROMPT).and_then(|p| messages_from_prompt(&p)))
}

/// Output text and structured object.
///
/// Text wins for `output`. An object sent as a JSON string becomes
/// `outputObject`, and the string itself fills `output` when there is no text.
/// An already-structured object only sets `outputObject`.
fn extract_output(
    attrs: &Attributes,
    version_keys: &VersionKeys,
) -> (Option<String>, Option<JsonValue>) {
    let mut output = get_text(attrs, version_keys.text);
    let Some(object) = get_value(attrs, version_keys.object).and_then(Encoded::from_value) else {
        return (output, None);
    };

    let decoded = object.decode_or_raw();
    if is_structured(&decoded) {
        if output.is_none()
            && let Encoded::RawString(raw) = object
        {
            output = Some(raw.to_string());
        }
        return (output, Some(decoded.into_owned()));
    }

    if output.is_none() {
        output = match object {
            Encoded::RawString(raw) => Some(raw.to_string()),
            Encoded::Json(value) => json_to_opt_string(value),
        };
    }
    (output, None)
}

fn extract_finish_reason(attrs: &Attributes, version_keys: &VersionKeys) -> Option<String> {
    get_first_str(attrs, version_keys.finish_reason)
        .map(String::from)
        .or_else(|| {
            get_string_list(attrs, keys::GEN_AI_RESPONSE_FINISH_REASONS)
                .into_iter()
                .next()
        })
}

/// Reasoning tokens from usage keys, then provider metadata.
///
/// Provider metadata is searched per configured provider
/// (`{"openai": {"reasoningTokens": 128}}`); the value must be a JSON number.
fn extract_reasoning_tokens(
    attrs: &Attributes,
    version_keys: &VersionKeys,
    reasoning_providers: &[String],
) -> Option<u64> {
    if let Some(tokens) = version_keys
        .reasoning_tokens
        .as_ref()
        .and_then(|t| t.extract(attrs))
    {
        return Some(tokens);
    }

    let metadata = get_value(attrs, version_keys.provider_metadata?)?;
    reasoning_providers
        .iter()
        .find_map(|provider| nested_count(metadata, &[provider.as_str(), "reasoningTokens"]))
}

/// OTel `gen_ai.request.*` keys win over SDK `ai.settings.*` keys.
fn extract_settings(attrs: &Attributes) -> Option<ModelSettings> {
    ModelSettings {
        temperature: first_float(
            attrs,
            &[keys::GEN_AI_REQUEST_TEMPERATURE, keys::AI_SETTINGS_TEMPERATURE],
        ),
        max_tokens: first_count(
            attrs,
            &[
                keys::GEN_AI_REQUEST_MAX_TOKENS,
                keys::AI_SETTINGS_MAX_OUTPUT_TOKENS,
                keys::AI_SETTINGS_MAX_TOKENS,
            ],
        ),
        top_p: first_float(attrs, &[keys::GEN_AI_REQUEST_TOP_P, keys::AI_SETTINGS_TOP_P]),
        presence_penalty: first_float(
            attrs,
            &[
                keys::GEN_AI_REQUEST_PRESENCE_PENALTY,
                keys::AI_SETTINGS_PRESENCE_PENALTY,
            ],
        ),
        frequency_penalty: first_float(
            attrs,
            &[
                keys::GEN_AI_REQUEST_FREQUENCY_PENALTY,
                keys::AI_SETTINGS_FREQUENCY_PENALTY,
            ],
        ),
    }
    .non_empty()
}

fn apply_telemetry_metadata(record: &mut NormalizedRecord, attrs: &Attributes) {
    record.trace_name = get_text(attrs, keys::META_TRACE_NAME);
    record.prompt_name = get_text(attrs, keys::META_PROMPT_NAME);
    record.props = get_text(attrs, keys::META_PROPS);
    record.session_id = get_first_text(attrs, &[keys::META_SESSION_ID, keys::META_SESSION_ID_CAMEL]);
    record.session_name = get_text(attrs, keys::META_SESSION_NAME);
    record.user_id = get_first_text(attrs, &[keys::META_USER_ID, keys::META_USER_ID_CAMEL]);
    record.dataset_run_id = get_text(attrs, keys::META_DATASET_RUN_ID);
    record.dataset_run_name = get_text(attrs, keys::META_DATASET_RUN_NAME);
    record.dataset_item_name = get_text(attrs, keys::META_DATASET_ITEM_NAME);
    record.dataset_expected_output = get_text(attrs, keys::META_DATASET_EXPECTED_OUTPUT);
}

#[cfg(test)]
#[path = "vercel_ai_tests.rs"]
mod tests;
