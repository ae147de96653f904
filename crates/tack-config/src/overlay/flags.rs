//! Explicit per-key overrides supplied by the invoking build command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::key::ConfigKey;
use crate::overlay::{MergeMode, Overlay};
use crate::tree::ConfigTree;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagOverride {
    pub key: ConfigKey,
    pub value: Value,
    pub mode: MergeMode,
}

impl FlagOverride {
    pub fn merge(key: ConfigKey, value: Value) -> Self {
        Self {
            key,
            value,
            mode: MergeMode::Merge,
        }
    }

    pub fn replace(key: ConfigKey, value: Value) -> Self {
        Self {
            key,
            value,
            mode: MergeMode::Replace,
        }
    }

    /// Parse `KEY=VALUE`.
    ///
    /// The value is read as JSON when it parses as JSON, otherwise it is
    /// taken verbatim as a string (`build.publicPath=/ui` works unquoted).
    pub fn parse(spec: &str, mode: MergeMode) -> Result<Self> {
        let Some((raw_key, raw_value)) = spec.split_once('=') else {
            return Err(ConfigError::InvalidFlag {
                flag: spec.to_string(),
                hint: Some("Use KEY=VALUE, e.g. build.vueRouterMode=history".to_string()),
            });
        };

        let key = ConfigKey::parse(raw_key).map_err(|err| ConfigError::InvalidFlag {
            flag: spec.to_string(),
            hint: Some(err.to_string()),
        })?;

        let value = serde_json::from_str(raw_value.trim())
            .unwrap_or_else(|_| Value::String(raw_value.to_string()));

        Ok(Self { key, value, mode })
    }

    /// Single-key overlay at the explicit stage.
    pub fn to_overlay(&self) -> Overlay {
        Overlay::explicit(
            format!("flag:{}", self.key),
            ConfigTree::single(&self.key, self.value.clone()),
        )
        .with_mode(self.mode)
    }
}
