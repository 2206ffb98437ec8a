use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::Transformer;
use crate::error::NormalizeError;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_REASONING_PROVIDERS};

// =============================================================================
// File Configuration
// =============================================================================

/// Transformer toggles section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SourcesFileConfig {
    pub vercel_ai: Option<bool>,
    pub agent: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub sources: Option<SourcesFileConfig>,
    pub reasoning_providers: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, NormalizeError> {
        serde_json::from_str(content).map_err(NormalizeError::Config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Which source transformers dispatch may select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcesConfig {
    pub vercel_ai: bool,
    pub agent: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            vercel_ai: true,
            agent: true,
        }
    }
}

impl SourcesConfig {
    pub fn is_enabled(&self, transformer: Transformer) -> bool {
        match transformer {
            Transformer::VercelAi => self.vercel_ai,
            Transformer::Agent => self.agent,
        }
    }

    fn only(enabled: &[Transformer]) -> Self {
        Self {
            vercel_ai: enabled.contains(&Transformer::VercelAi),
            agent: enabled.contains(&Transformer::Agent),
        }
    }
}

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizerConfig {
    pub sources: SourcesConfig,
    /// Provider keys searched, in order, for `reasoningTokens` in provider metadata
    pub reasoning_providers: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            reasoning_providers: DEFAULT_REASONING_PROVIDERS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl NormalizerConfig {
    /// Resolve a file config over the defaults
    pub fn from_file_config(file: FileConfig) -> Self {
        let defaults = Self::default();
        let file_sources = file.sources.unwrap_or_default();
        Self {
            sources: SourcesConfig {
                vercel_ai: file_sources
                    .vercel_ai
                    .unwrap_or(defaults.sources.vercel_ai),
                agent: file_sources.agent.unwrap_or(defaults.sources.agent),
            },
            reasoning_providers: file
                .reasoning_providers
                .unwrap_or(defaults.reasoning_providers),
        }
    }

    /// Parse and resolve a JSON config document
    pub fn from_json_str(content: &str) -> Result<Self, NormalizeError> {
        let file = FileConfig::from_json_str(content)?;
        file.warn_unknown_fields();
        Ok(Self::from_file_config(file))
    }

    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading normalizer configuration");

        let path = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() { Some(local) } else { None }
            }
        };

        let file_config = match path {
            Some(path) => {
                let file_config = FileConfig::load_from_file(&path)?;
                file_config.warn_unknown_fields();
                file_config
            }
            None => FileConfig::default(),
        };

        let mut config = Self::from_file_config(file_config);
        if let Some(sources) = &cli.sources {
            config.sources = SourcesConfig::only(sources);
        }
        if let Some(providers) = &cli.reasoning_providers {
            config.reasoning_providers = providers.clone();
        }

        tracing::debug!(config = ?config, "Normalizer configuration resolved");
        Ok(config)
    }
}
