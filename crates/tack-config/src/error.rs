//! Error types for configuration loading and overlay construction.
//!
//! These cover operational failures only. Problems found in a resolved
//! configuration are reported as [`ValidationIssue`](crate::ValidationIssue)s
//! and never abort resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid override '{flag}'")]
    InvalidFlag { flag: String, hint: Option<String> },

    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),

    #[error("invalid overlay '{name}': {message}")]
    InvalidOverlay { name: String, message: String },

    // Project file discovery/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value: {field}")]
    InvalidValue { field: String, hint: Option<String> },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Actionable hint for the user, when one is known.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidFlag { hint, .. } | ConfigError::InvalidValue { hint, .. } => {
                hint.as_deref()
            }
            ConfigError::UnknownTarget(_) => {
                Some("Expected one of: web, pwa, desktop-shell, mobile-shell")
            }
            ConfigError::UnknownEnvironment(_) => {
                Some("Expected one of: development, staging, production")
            }
            ConfigError::NotFound => Some("Create a tack.toml or add a 'tack' field to package.json"),
            _ => None,
        }
    }
}
