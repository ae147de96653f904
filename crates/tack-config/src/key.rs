//! Dotted configuration paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Well-known keys read by the resolver, validator and projections.
pub mod keys {
    pub const COMPONENTS: &str = "framework.components";
    pub const DIRECTIVES: &str = "framework.directives";
    pub const PLUGINS: &str = "framework.plugins";
    pub const PLUGIN_OPTIONS: &str = "framework.config";
    pub const EXTRAS: &str = "extras";
    pub const ANIMATIONS: &str = "animations";
    pub const BOOT: &str = "boot";
    pub const CSS: &str = "css";

    pub const PUBLIC_PATH: &str = "build.publicPath";
    pub const APP_ENV: &str = "build.env.APP_ENV";
    pub const APP_API: &str = "build.env.APP_API";
    pub const BUILD_ENV: &str = "build.env";
    pub const ROUTER_MODE: &str = "build.vueRouterMode";
    pub const BROWSER_TARGETS: &str = "build.target.browser";
    pub const NODE_TARGET: &str = "build.target.node";
    pub const SCOPE_HOISTING: &str = "build.scopeHoisting";
    pub const DROP_CONSOLE: &str = "build.uglifyOptions.compress.drop_console";
    pub const DROP_DEBUGGER: &str = "build.uglifyOptions.compress.drop_debugger";

    pub const DEV_SERVER: &str = "devServer";

    pub const WORKBOX_MODE: &str = "pwa.workboxMode";
    pub const WORKBOX_OPTIONS: &str = "pwa.workboxOptions";
    pub const MANIFEST: &str = "pwa.manifest";
    pub const MANIFEST_NAME: &str = "pwa.manifest.name";
    pub const MANIFEST_DISPLAY: &str = "pwa.manifest.display";
    pub const MANIFEST_ORIENTATION: &str = "pwa.manifest.orientation";
    pub const MANIFEST_ICONS: &str = "pwa.manifest.icons";

    pub const ELECTRON_BUNDLER: &str = "electron.bundler";
    pub const ELECTRON_PACKAGER: &str = "electron.packager";
    pub const ELECTRON_BUILDER: &str = "electron.builder";
    pub const PACKAGER_BUNDLE_ID: &str = "electron.packager.appBundleId";
    pub const BUILDER_APP_ID: &str = "electron.builder.appId";

    pub const CORDOVA: &str = "cordova";
    pub const CORDOVA_ID: &str = "cordova.id";
}

/// A dotted path identifying a configuration leaf, e.g. `build.publicPath`.
///
/// Array elements are addressed with a numeric segment
/// (`pwa.manifest.icons.0.src`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Parse a dotted path, rejecting empty segments and whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::InvalidKey {
                key: raw.to_string(),
                reason: "key cannot be empty".to_string(),
            });
        }

        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(ConfigError::InvalidKey {
                    key: raw.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            if segment.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidKey {
                    key: raw.to_string(),
                    reason: format!("segment '{segment}' contains whitespace"),
                });
            }
        }

        Ok(Self(raw.to_string()))
    }

    /// Build a key from one of the constants in [`keys`].
    pub fn well_known(raw: &'static str) -> Self {
        debug_assert!(Self::parse(raw).is_ok(), "malformed well-known key {raw}");
        Self(raw.to_string())
    }

    pub(crate) fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Append one segment (a field name or an array index).
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('.').map(|(parent, _)| Self(parent.to_string()))
    }

    /// Whether `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &ConfigKey) -> bool {
        self.0 == prefix.0
            || (self.0.starts_with(&prefix.0) && self.0[prefix.0.len()..].starts_with('.'))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConfigKey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_paths() {
        let key = ConfigKey::parse("build.publicPath").unwrap();
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["build", "publicPath"]);
        assert_eq!(key.to_string(), "build.publicPath");
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(ConfigKey::parse("").is_err());
        assert!(ConfigKey::parse("build..publicPath").is_err());
        assert!(ConfigKey::parse(".build").is_err());
        assert!(ConfigKey::parse("build.").is_err());
    }

    #[test]
    fn rejects_whitespace_inside_segments() {
        let err = ConfigKey::parse("build.public path").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { .. }));
    }

    #[test]
    fn parent_and_child() {
        let key = ConfigKey::well_known(keys::MANIFEST_ICONS);
        assert_eq!(key.child(0).as_str(), "pwa.manifest.icons.0");
        assert_eq!(key.parent().unwrap().as_str(), "pwa.manifest");
        assert!(ConfigKey::parse("pwa").unwrap().parent().is_none());
    }

    #[test]
    fn prefix_matching_respects_segment_boundaries() {
        let icons = ConfigKey::well_known(keys::MANIFEST_ICONS);
        let manifest = ConfigKey::well_known(keys::MANIFEST);
        assert!(icons.starts_with(&manifest));
        assert!(icons.starts_with(&icons));
        assert!(!ConfigKey::parse("pwa.manifestx").unwrap().starts_with(&manifest));
    }

    #[test]
    fn deserializes_through_validation() {
        let key: ConfigKey = serde_json::from_str("\"build.env.APP_API\"").unwrap();
        assert_eq!(key.as_str(), "build.env.APP_API");
        assert!(serde_json::from_str::<ConfigKey>("\"a..b\"").is_err());
    }
}
