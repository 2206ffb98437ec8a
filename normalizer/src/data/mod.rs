//! Data layer: input and output record types

pub mod types;

pub use types::{
    Attributes, Message, ModelSettings, NormalizedRecord, NormalizedSpan, SchemaVersion,
    SpanRecord, SpanType, ToolCall, Transformer,
};
