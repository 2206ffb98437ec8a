//! Domain layer: span normalization

pub mod spans;

pub use spans::{
    SpanNormalizer, detect_version, normalize_span, select_transformer, transform_span,
};
