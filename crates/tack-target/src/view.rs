//! Typed reads over an effective configuration.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tack_config::tree::is_empty_value;
use tack_config::{ConfigKey, EffectiveConfig, Target};

use crate::error::{Result, TargetError};

/// Read-only accessor handed to [`BuildTarget`](crate::BuildTarget)
/// implementations during projection.
pub struct ConfigView<'a> {
    config: &'a EffectiveConfig,
}

impl<'a> ConfigView<'a> {
    pub fn new(config: &'a EffectiveConfig) -> Self {
        Self { config }
    }

    pub fn effective(&self) -> &'a EffectiveConfig {
        self.config
    }

    pub fn target(&self) -> Target {
        self.config.target()
    }

    pub fn value(&self, key: &'static str) -> Option<&'a Value> {
        self.config
            .get(&ConfigKey::well_known(key))
            .filter(|value| !value.is_null())
    }

    /// Present and non-empty, or [`TargetError::MissingField`].
    pub fn required(&self, key: &'static str) -> Result<&'a Value> {
        self.value(key)
            .filter(|value| !is_empty_value(value))
            .ok_or_else(|| TargetError::MissingField {
                target: self.target(),
                key: key.to_string(),
            })
    }

    /// Deserialize the value at `key`, if there is one.
    pub fn section<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        self.value(key).map(|value| decode(key, value)).transpose()
    }

    /// Like [`section`](Self::section) but absence is an error.
    pub fn required_section<T: DeserializeOwned>(&self, key: &'static str) -> Result<T> {
        decode(key, self.required(key)?)
    }

    pub fn string(&self, key: &'static str) -> Result<Option<String>> {
        self.section(key)
    }

    /// A string list; absent means empty.
    pub fn strings(&self, key: &'static str) -> Result<Vec<String>> {
        Ok(self.section(key)?.unwrap_or_default())
    }

    pub fn flag(&self, key: &'static str, default: bool) -> Result<bool> {
        Ok(self.section(key)?.unwrap_or(default))
    }

    /// The table at `key`, or an empty one.
    pub fn table(&self, key: &'static str) -> Value {
        self.value(key)
            .filter(|value| value.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|source| TargetError::InvalidSection {
        key: key.to_string(),
        source,
    })
}
