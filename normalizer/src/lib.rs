//! GenAI span normalizer
//!
//! Maps spans from the Vercel AI SDK (v4 and v5 attribute schemas) and from an
//! agent-orchestration framework onto one [`NormalizedRecord`] shape.
//!
//! ```no_run
//! use genai_span_normalizer::{SpanRecord, normalize_span};
//!
//! let span = SpanRecord::new("trace", "span", "ai.generateText.doGenerate")
//!     .with_attribute("ai.model.id", "gpt-4o")
//!     .with_attribute("ai.response.text", "Hello, world!");
//! let normalized = normalize_span(&span);
//! assert_eq!(normalized.record.output.as_deref(), Some("Hello, world!"));
//! ```

mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod error;
pub mod utils;

pub use crate::core::{NormalizerConfig, SourcesConfig};
pub use data::{
    Attributes, Message, ModelSettings, NormalizedRecord, NormalizedSpan, SchemaVersion,
    SpanRecord, SpanType, ToolCall, Transformer,
};
pub use domain::{SpanNormalizer, detect_version, normalize_span, select_transformer};
pub use error::NormalizeError;
