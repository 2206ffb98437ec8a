//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::CliApp;
pub use cli::CliConfig;
pub use config::{FileConfig, NormalizerConfig, SourcesConfig};
