//! Utility functions for the normalizer

pub mod json;
pub mod otlp;
pub mod string;
pub mod time;
