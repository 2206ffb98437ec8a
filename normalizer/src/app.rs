//! Command-line application

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use prost::Message;
use serde_json::Value as JsonValue;

use crate::core::cli::{self, CliConfig};
use crate::core::config::NormalizerConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::NormalizedSpan;
use crate::domain::spans::SpanNormalizer;
use crate::utils::otlp::span_records_from_request;

pub struct CliApp {
    cli: CliConfig,
    normalizer: SpanNormalizer,
}

impl CliApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        let cli_config = cli::parse();
        Self::init_logging(cli_config.log.as_deref());

        tracing::debug!(cli = ?cli_config, "Normalizer starting");

        let config = NormalizerConfig::load(&cli_config)?;
        let app = Self {
            cli: cli_config,
            normalizer: SpanNormalizer::new(config),
        };
        app.process()
    }

    fn init_logging(log: Option<&str>) {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = log
            .map(String::from)
            .or_else(|| std::env::var(ENV_LOG).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    fn process(&self) -> Result<()> {
        let input = self.read_input()?;

        let normalized = if self.cli.otlp {
            let request = ExportTraceServiceRequest::decode(input.as_slice())
                .context("Failed to decode OTLP ExportTraceServiceRequest")?;
            let records = span_records_from_request(&request);
            tracing::debug!(spans = records.len(), "Decoded OTLP request");
            self.normalizer.normalize_batch(&records)
        } else {
            let content = String::from_utf8(input).context("Input is not valid UTF-8")?;
            let values = parse_json_input(&content)?;
            self.normalize_values(&values)
        };

        self.write_output(&normalized)?;
        tracing::info!(spans = normalized.len(), "Normalization complete");
        Ok(())
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.cli.input {
            Some(path) => fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
        }
    }

    /// Normalize each value, skipping ones that are not span records
    fn normalize_values(&self, values: &[JsonValue]) -> Vec<NormalizedSpan> {
        values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match self.normalizer.normalize_value(value) {
                Ok(span) => Some(span),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping invalid span record");
                    None
                }
            })
            .collect()
    }

    fn write_output(&self, spans: &[NormalizedSpan]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for span in spans {
            if self.cli.pretty {
                serde_json::to_writer_pretty(&mut out, span)?;
            } else {
                serde_json::to_writer(&mut out, span)?;
            }
            writeln!(out)?;
        }
        out.flush().context("Failed to flush stdout")
    }
}

/// Parse a JSON array of span records or JSON lines.
///
/// A malformed array fails the whole input. A malformed line is logged and
/// skipped.
fn parse_json_input(content: &str) -> Result<Vec<JsonValue>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Failed to parse JSON array input");
    }

    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<JsonValue>(line) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed JSON line");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_array() {
        let values = parse_json_input(r#"  [{"a": 1}, {"b": 2}]"#).unwrap();
        assert_eq!(values, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_json_lines_skips_bad_lines() {
        let content = "{\"a\":1}\n\nnot json\n{\"b\":2}\n";
        let values = parse_json_input(content).unwrap();
        assert_eq!(values, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_malformed_array_fails() {
        assert!(parse_json_input("[{\"a\":1},").is_err());
    }

    #[test]
    fn test_normalize_values_skips_non_spans() {
        let app = CliApp {
            cli: CliConfig::default(),
            normalizer: SpanNormalizer::default(),
        };
        let values = vec![
            json!({"traceId": "t", "spanId": "s", "name": "agent.stream"}),
            json!("not a span"),
            json!({"traceId": "t", "spanId": "s2", "name": "ai.generateText"}),
        ];
        let spans = app.normalize_values(&values);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].span_id, "s2");
    }
}
