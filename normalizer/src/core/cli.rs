use clap::Parser;

use std::path::PathBuf;

use crate::data::Transformer;

use super::constants::{BIN_NAME, ENV_CONFIG, ENV_LOG};

#[derive(Parser)]
#[command(name = BIN_NAME)]
#[command(
    version,
    about = "Normalize GenAI instrumentation spans into one record shape",
    long_about = None
)]
pub struct Cli {
    /// Input file with span records (JSON array or JSON lines). Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Treat the input as a binary OTLP ExportTraceServiceRequest
    #[arg(long)]
    pub otlp: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enabled transformers, comma-separated (vercel_ai, agent)
    #[arg(long, value_delimiter = ',', value_parser = parse_transformer)]
    pub sources: Option<Vec<Transformer>>,

    /// Provider keys searched for reasoning tokens in provider metadata, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub reasoning_providers: Option<Vec<String>>,

    /// Pretty-print each normalized span instead of one JSON object per line
    #[arg(long)]
    pub pretty: bool,

    /// Log filter (falls back to RUST_LOG)
    #[arg(long, env = ENV_LOG)]
    pub log: Option<String>,
}

/// Parse a transformer name from CLI/env string
fn parse_transformer(s: &str) -> Result<Transformer, String> {
    match s.trim().to_lowercase().as_str() {
        "vercel_ai" | "vercel-ai" => Ok(Transformer::VercelAi),
        "agent" => Ok(Transformer::Agent),
        _ => Err(format!(
            "Invalid source '{}'. Valid options: vercel_ai, agent",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub input: Option<PathBuf>,
    pub otlp: bool,
    pub config: Option<PathBuf>,
    pub sources: Option<Vec<Transformer>>,
    pub reasoning_providers: Option<Vec<String>>,
    pub pretty: bool,
    pub log: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            otlp: cli.otlp,
            config: cli.config,
            sources: cli.sources,
            reasoning_providers: cli.reasoning_providers,
            pretty: cli.pretty,
            log: cli.log,
        }
    }
}

/// Parse CLI arguments into configuration
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
