//! Error handling for the tack CLI.
//!
//! Library errors convert into [`CliError`] via `From`, so commands can use
//! `?` throughout. Validation problems are not errors until a command decides
//! they should fail the invocation; then they surface as
//! [`CliError::Validation`].

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Overlay, flag or project-file errors
    #[error("Configuration error: {0}")]
    Config(#[from] tack_config::ConfigError),

    /// The resolved configuration has error-severity issues or could not be
    /// projected
    #[error("{errors} configuration error(s) for {targets}")]
    Validation {
        /// Number of errors across all targets
        errors: usize,
        /// Targets that failed, comma separated
        targets: String,
    },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Project directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
