//! Data types shared by the normalization engine
//!
//! - `enums`: span type, schema version and transformer identifiers
//! - `span`: raw input span record
//! - `normalized`: normalized output records

mod enums;
mod normalized;
mod span;

pub use enums::{SchemaVersion, SpanType, Transformer};
pub use normalized::{Message, ModelSettings, NormalizedRecord, NormalizedSpan, ToolCall};
pub use span::{Attributes, SpanRecord};
