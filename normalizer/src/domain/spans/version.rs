//! Vercel AI SDK schema version detection

use crate::data::{Attributes, SchemaVersion};

use super::decode::any_present;
use super::keys;

/// Keys only the v5 schema emits
const V5_KEYS: &[&str] = &[
    keys::AI_RESPONSE_TEXT,
    keys::AI_RESPONSE_OBJECT,
    keys::AI_RESPONSE_TOOL_CALLS,
    keys::AI_RESPONSE_FINISH_REASON,
    keys::AI_RESPONSE_PROVIDER_METADATA,
    keys::AI_USAGE_INPUT_TOKENS,
    keys::AI_USAGE_OUTPUT_TOKENS,
    keys::AI_USAGE_TOTAL_TOKENS,
    keys::AI_USAGE_REASONING_TOKENS,
    keys::AI_SETTINGS_MAX_OUTPUT_TOKENS,
];

/// Keys only the v4 schema emits
const V4_KEYS: &[&str] = &[
    keys::AI_RESULT_TEXT,
    keys::AI_RESULT_OBJECT,
    keys::AI_RESULT_TOOL_CALLS,
    keys::AI_RESULT_FINISH_REASON,
    keys::AI_FINISH_REASON,
    keys::AI_USAGE_PROMPT_TOKENS,
    keys::AI_USAGE_COMPLETION_TOKENS,
    keys::AI_SETTINGS_MAX_TOKENS,
];

/// Detect the attribute schema of a Vercel AI SDK span.
///
/// A single v5 key is enough to win, even when v4 keys are also present.
/// Null values are absent; `0`, `""` and `false` count as present.
pub fn detect_version(attrs: &Attributes) -> SchemaVersion {
    if any_present(attrs, V5_KEYS) {
        SchemaVersion::V5
    } else if any_present(attrs, V4_KEYS) {
        SchemaVersion::V4
    } else {
        SchemaVersion::Unknown
    }
}
