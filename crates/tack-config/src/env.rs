//! Environment context snapshot.
//!
//! The process environment is read exactly once, before resolution starts,
//! and passed around as a value. Every recognized variable always has a value:
//! missing or empty variables resolve to the fallback declared in
//! [`defaults::env_fallbacks`](crate::defaults::env_fallbacks).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use figment::providers::Env;
use serde::{Deserialize, Serialize};

use crate::defaults::env_fallbacks;
use crate::error::ConfigError;

pub const APP_ENV: &str = "APP_ENV";
pub const APP_API: &str = "APP_API";
pub const APP_PUBLIC_PATH: &str = "APP_PUBLIC_PATH";

/// Variables the reader picks up from the process environment.
pub const RECOGNIZED: [&str; 3] = [APP_ENV, APP_API, APP_PUBLIC_PATH];

/// Build environment selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Map a raw `APP_ENV` value onto an environment.
    ///
    /// Unrecognized values fall back to production.
    pub fn select(raw: &str) -> EnvironmentSelection {
        match raw.parse() {
            Ok(environment) => EnvironmentSelection::Known(environment),
            Err(_) => EnvironmentSelection::Unknown {
                raw: raw.to_string(),
                fallback: Environment::Production,
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSelection {
    Known(Environment),
    Unknown { raw: String, fallback: Environment },
}

impl EnvironmentSelection {
    pub fn environment(&self) -> Environment {
        match self {
            EnvironmentSelection::Known(environment) => *environment,
            EnvironmentSelection::Unknown { fallback, .. } => *fallback,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EnvironmentSelection::Known(_))
    }
}

/// Snapshot of the recognized environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentContext {
    vars: BTreeMap<String, String>,
}

impl Default for EnvironmentContext {
    fn default() -> Self {
        Self::from_pairs(std::iter::empty::<(&str, &str)>())
    }
}

impl EnvironmentContext {
    /// Snapshot the process environment. Never fails.
    pub fn read() -> Self {
        let provider = Env::raw().only(&RECOGNIZED);
        let pairs: Vec<(String, String)> = provider
            .iter()
            .map(|(key, value)| (key.as_str().to_ascii_uppercase(), value))
            .collect();

        tracing::debug!(
            found = pairs.len(),
            "read environment context"
        );
        Self::from_pairs(pairs)
    }

    /// Build a context from explicit pairs, applying fallbacks.
    ///
    /// Unrecognized names are ignored; empty values count as unset.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut vars: BTreeMap<String, String> = env_fallbacks()
            .iter()
            .map(|(name, fallback)| (name.to_string(), fallback.to_string()))
            .collect();

        for (name, value) in pairs {
            let name = name.as_ref();
            let value = value.into();
            if !RECOGNIZED.contains(&name) || value.is_empty() {
                continue;
            }
            vars.insert(name.to_string(), value);
        }

        Self { vars }
    }

    /// Return a copy with `name` overridden, e.g. from a command-line flag.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if RECOGNIZED.contains(&name) && !value.is_empty() {
            self.vars.insert(name.to_string(), value);
        }
        self
    }

    /// Value of a recognized variable. Always `Some` for recognized names.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn app_env(&self) -> &str {
        self.get(APP_ENV).unwrap_or_default()
    }

    pub fn api(&self) -> &str {
        self.get(APP_API).unwrap_or_default()
    }

    pub fn public_path(&self) -> &str {
        self.get(APP_PUBLIC_PATH).unwrap_or_default()
    }

    pub fn selection(&self) -> EnvironmentSelection {
        Environment::select(self.app_env())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn missing_variables_use_fallbacks() {
        let ctx = EnvironmentContext::from_pairs(std::iter::empty::<(&str, &str)>());
        assert_eq!(ctx.app_env(), "production");
        assert_eq!(ctx.api(), "/api");
        assert_eq!(ctx.public_path(), "");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let ctx = EnvironmentContext::from_pairs([(APP_API, ""), (APP_ENV, "development")]);
        assert_eq!(ctx.api(), "/api");
        assert_eq!(ctx.app_env(), "development");
    }

    #[test]
    fn unrecognized_names_are_ignored() {
        let ctx = EnvironmentContext::from_pairs([("HOME", "/root")]);
        assert!(ctx.get("HOME").is_none());
        assert_eq!(ctx.iter().count(), RECOGNIZED.len());
    }

    #[test]
    fn with_overrides_single_value() {
        let ctx = EnvironmentContext::default().with(APP_PUBLIC_PATH, "/ui/");
        assert_eq!(ctx.public_path(), "/ui/");
        assert_eq!(ctx.api(), "/api");
    }

    #[test]
    fn unknown_environment_falls_back_to_production() {
        let selection = Environment::select("qa");
        assert!(!selection.is_known());
        assert_eq!(selection.environment(), Environment::Production);
        assert_eq!(
            Environment::select("staging"),
            EnvironmentSelection::Known(Environment::Staging)
        );
    }

    #[test]
    fn environment_names_match_exactly() {
        for raw in ["Production", "STAGING", " development"] {
            let selection = Environment::select(raw);
            assert!(!selection.is_known(), "{raw:?} should be unknown");
            assert_eq!(selection.environment(), Environment::Production);
        }
    }

    #[test]
    #[serial]
    fn read_snapshots_process_environment() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            std::env::set_var(APP_ENV, "development");
            std::env::set_var(APP_API, "https://api.example.com");
            std::env::remove_var(APP_PUBLIC_PATH);
        }

        let ctx = EnvironmentContext::read();

        unsafe {
            std::env::remove_var(APP_ENV);
            std::env::remove_var(APP_API);
        }

        assert_eq!(ctx.app_env(), "development");
        assert_eq!(ctx.api(), "https://api.example.com");
        assert_eq!(ctx.public_path(), "");
    }
}
