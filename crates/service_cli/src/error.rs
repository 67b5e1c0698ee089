//! CLI error types.

use sampler_core::SamplerError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `sampler` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Sampling error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
