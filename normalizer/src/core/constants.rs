// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for log targets and identifiers)
pub const APP_NAME_LOWER: &str = "genai_span_normalizer";

/// Binary name
pub const BIN_NAME: &str = "span-normalize";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "span-normalizer.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SPAN_NORMALIZER_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SPAN_NORMALIZER_LOG";

// =============================================================================
// Normalizer Defaults
// =============================================================================

/// Provider keys searched for `reasoningTokens` inside provider metadata
pub const DEFAULT_REASONING_PROVIDERS: &[&str] = &["openai", "azure"];

/// Maximum characters of a raw value echoed into trace logs
pub const LOG_PREVIEW_MAX_LEN: usize = 100;
