//! Span Normalization
//!
//! Turns raw instrumentation spans into one [`NormalizedRecord`] shape.
//!
//! ## Sources
//!
//! - Vercel AI SDK automatic instrumentation, both attribute schemas
//!   (`ai.result.*` for v4, `ai.response.*` for v5)
//! - Agent-orchestration manual instrumentation (`agent.*` span names,
//!   `agent.<op>.argument.N` / `agent.<op>.result` attributes)
//!
//! ## Pipeline
//!
//! 1. `dispatch`: pick a [`Transformer`] from the span name and attribute keys
//! 2. `version`: detect the SDK schema version (Vercel AI only)
//! 3. `vercel_ai` / `agent`: classify the span and extract fields
//! 4. `normalizer`: attach span identity and timing
//!
//! Every value passes through `decode` first, so an attribute may arrive as a
//! structured value or as its JSON-encoded string. Extraction failures drop
//! the field; they never fail the span.
//!
//! [`NormalizedRecord`]: crate::data::NormalizedRecord

mod agent;
mod decode;
mod dispatch;
mod fields;
mod normalizer;
mod vercel_ai;
mod version;

pub use dispatch::{select_transformer, transform_span};
pub use normalizer::{SpanNormalizer, normalize_span};
pub use version::detect_version;

// ============================================================================
// ATTRIBUTE KEYS
// ============================================================================

/// Attribute key constants
pub(super) mod keys {
    // Vercel AI SDK: model and prompt
    pub const AI_MODEL_ID: &str = "ai.model.id";
    pub const AI_MODEL_PROVIDER: &str = "ai.model.provider";
    pub const AI_PROMPT: &str = "ai.prompt";
    pub const AI_PROMPT_MESSAGES: &str = "ai.prompt.messages";

    // Vercel AI SDK v5 response
    pub const AI_RESPONSE_TEXT: &str = "ai.response.text";
    pub const AI_RESPONSE_OBJECT: &str = "ai.response.object";
    pub const AI_RESPONSE_TOOL_CALLS: &str = "ai.response.toolCalls";
    pub const AI_RESPONSE_FINISH_REASON: &str = "ai.response.finishReason";
    pub const AI_RESPONSE_PROVIDER_METADATA: &str = "ai.response.providerMetadata";

    // Vercel AI SDK v4 result
    pub const AI_RESULT_TEXT: &str = "ai.result.text";
    pub const AI_RESULT_OBJECT: &str = "ai.result.object";
    pub const AI_RESULT_TOOL_CALLS: &str = "ai.result.toolCalls";
    pub const AI_RESULT_FINISH_REASON: &str = "ai.result.finishReason";
    pub const AI_FINISH_REASON: &str = "ai.finishReason";

    // Vercel AI SDK usage
    pub const AI_USAGE_INPUT_TOKENS: &str = "ai.usage.inputTokens";
    pub const AI_USAGE_OUTPUT_TOKENS: &str = "ai.usage.outputTokens";
    pub const AI_USAGE_TOTAL_TOKENS: &str = "ai.usage.totalTokens";
    pub const AI_USAGE_REASONING_TOKENS: &str = "ai.usage.reasoningTokens";
    pub const AI_USAGE_PROMPT_TOKENS: &str = "ai.usage.promptTokens";
    pub const AI_USAGE_COMPLETION_TOKENS: &str = "ai.usage.completionTokens";

    // Vercel AI SDK settings
    pub const AI_SETTINGS_TEMPERATURE: &str = "ai.settings.temperature";
    pub const AI_SETTINGS_MAX_OUTPUT_TOKENS: &str = "ai.settings.maxOutputTokens";
    pub const AI_SETTINGS_MAX_TOKENS: &str = "ai.settings.maxTokens";
    pub const AI_SETTINGS_TOP_P: &str = "ai.settings.topP";
    pub const AI_SETTINGS_PRESENCE_PENALTY: &str = "ai.settings.presencePenalty";
    pub const AI_SETTINGS_FREQUENCY_PENALTY: &str = "ai.settings.frequencyPenalty";

    // Vercel AI SDK telemetry metadata
    pub const META_TRACE_NAME: &str = "ai.telemetry.metadata.trace_name";
    pub const META_PROMPT_NAME: &str = "ai.telemetry.metadata.prompt_name";
    pub const META_PROPS: &str = "ai.telemetry.metadata.props";
    pub const META_SESSION_ID: &str = "ai.telemetry.metadata.session_id";
    pub const META_SESSION_ID_CAMEL: &str = "ai.telemetry.metadata.sessionId";
    pub const META_SESSION_NAME: &str = "ai.telemetry.metadata.session_name";
    pub const META_USER_ID: &str = "ai.telemetry.metadata.user_id";
    pub const META_USER_ID_CAMEL: &str = "ai.telemetry.metadata.userId";
    pub const META_DATASET_RUN_ID: &str = "ai.telemetry.metadata.dataset_run_id";
    pub const META_DATASET_RUN_NAME: &str = "ai.telemetry.metadata.dataset_run_name";
    pub const META_DATASET_ITEM_NAME: &str = "ai.telemetry.metadata.dataset_item_name";
    pub const META_DATASET_EXPECTED_OUTPUT: &str =
        "ai.telemetry.metadata.dataset_expected_output";

    // OTel GenAI semantic conventions
    pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
    pub const GEN_AI_SYSTEM: &str = "gen_ai.system";
    pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
    pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";
    pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";
    pub const GEN_AI_REQUEST_PRESENCE_PENALTY: &str = "gen_ai.request.presence_penalty";
    pub const GEN_AI_REQUEST_FREQUENCY_PENALTY: &str = "gen_ai.request.frequency_penalty";
    pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";
    pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";
    pub const GEN_AI_USAGE_TOTAL_TOKENS: &str = "gen_ai.usage.total_tokens";
    pub const GEN_AI_USAGE_REASONING_TOKENS: &str = "gen_ai.usage.output_reasoning_tokens";
    pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

    // Agent framework
    pub const AGENT_PREFIX: &str = "agent.";
    pub const AGENT_RESOLVE_MODEL_CONFIG_RESULT: &str = "agent.resolveModelConfig.result";
    pub const AGENT_PREPARE_LLM_OPTIONS_ARG0: &str = "agent.prepareLLMOptions.argument.0";
    pub const AGENTMARK_TRACE_NAME: &str = "agentmark.trace_name";
    pub const AGENTMARK_PROMPT_NAME: &str = "agentmark.prompt_name";
    pub const AGENTMARK_PROPS: &str = "agentmark.props";
    pub const AGENTMARK_SESSION_ID: &str = "agentmark.session_id";
    pub const AGENTMARK_USER_ID: &str = "agentmark.user_id";
    pub const COMPONENT_NAME: &str = "componentName";

    /// Keys that reveal which model served a Vercel AI span
    pub const MODEL_KEYS: &[&str] = &[
        AI_MODEL_ID,
        GEN_AI_REQUEST_MODEL,
        AI_MODEL_PROVIDER,
        GEN_AI_SYSTEM,
    ];

    pub const AI_PREFIX: &str = "ai.";
}
