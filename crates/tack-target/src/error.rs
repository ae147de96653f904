//! Error types for target projection.

use tack_config::{ConfigError, Target};

/// Result type for target operations
pub type Result<T> = std::result::Result<T, TargetError>;

/// Error type for target operations
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("configuration was resolved for {resolved}, not {requested}")]
    TargetMismatch { resolved: Target, requested: Target },

    #[error("'{key}' is required to build the {target} target")]
    MissingField { target: Target, key: String },

    #[error("'{key}' has an unexpected shape: {source}")]
    InvalidSection {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
