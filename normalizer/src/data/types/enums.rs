//! Classification enums for normalized spans
//!
//! These enums are shared between the normalization engine and its output
//! records so that every producer family maps onto the same vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CLASSIFICATION ENUMS
// ============================================================================

/// Span type of a normalized record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpanType {
    /// One model-invocation leaf
    Generation,
    #[default]
    Span,
}

impl SpanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generation => "GENERATION",
            Self::Span => "SPAN",
        }
    }
}

impl fmt::Display for SpanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute schema generation of the AI SDK that produced a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// `ai.response.*` / `ai.usage.inputTokens` family
    V5,
    /// `ai.result.*` / `ai.usage.promptTokens` family
    V4,
    #[default]
    Unknown,
}

impl SchemaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V5 => "v5",
            Self::V4 => "v4",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source transformer that handled a span
///
/// A closed set: dispatch checks each variant's signals in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transformer {
    /// Vercel AI SDK automatic instrumentation (both attribute schemas)
    VercelAi,
    /// Agent-orchestration framework manual instrumentation (`agent.*` spans)
    Agent,
}

impl Transformer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VercelAi => "vercel_ai",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
