//! Deployment targets and the keys each of them requires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::key::{ConfigKey, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    Web,
    Pwa,
    DesktopShell,
    MobileShell,
}

impl Target {
    pub const ALL: [Target; 4] = [
        Target::Web,
        Target::Pwa,
        Target::DesktopShell,
        Target::MobileShell,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Web => "web",
            Target::Pwa => "pwa",
            Target::DesktopShell => "desktop-shell",
            Target::MobileShell => "mobile-shell",
        }
    }

    /// Packaged shells load assets from the filesystem.
    pub fn is_shell(self) -> bool {
        matches!(self, Target::DesktopShell | Target::MobileShell)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" | "spa" => Ok(Target::Web),
            "pwa" => Ok(Target::Pwa),
            "desktop-shell" | "desktop" | "electron" => Ok(Target::DesktopShell),
            "mobile-shell" | "mobile" | "cordova" => Ok(Target::MobileShell),
            _ => Err(ConfigError::UnknownTarget(s.to_string())),
        }
    }
}

/// A key the target cannot build without.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "kebab-case")]
pub enum Requirement {
    /// Present and not empty.
    NonEmpty(ConfigKey),
    /// A non-empty list of `{src, sizes, type}` icon entries.
    IconList(ConfigKey),
}

impl Requirement {
    pub fn key(&self) -> &ConfigKey {
        match self {
            Requirement::NonEmpty(key) | Requirement::IconList(key) => key,
        }
    }
}

/// A key whose absence is reported as a warning.
///
/// When `when` is set, the recommendation only applies if that key holds the
/// given value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub key: ConfigKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<(ConfigKey, Value)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDescriptor {
    pub target: Target,
    pub mandatory: Vec<Requirement>,
    pub recommended: Vec<Recommendation>,
    /// Protected keys on top of the global set.
    pub protected: Vec<ConfigKey>,
}

impl TargetDescriptor {
    /// Empty descriptor; use the builder methods to add requirements.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            mandatory: Vec::new(),
            recommended: Vec::new(),
            protected: Vec::new(),
        }
    }

    /// The built-in descriptor for `target`.
    pub fn for_target(target: Target) -> Self {
        let common = Self::new(target)
            .require(Requirement::NonEmpty(ConfigKey::well_known(keys::COMPONENTS)))
            .require(Requirement::NonEmpty(ConfigKey::well_known(
                keys::BROWSER_TARGETS,
            )));

        match target {
            Target::Web => common,
            Target::Pwa => common
                .require(Requirement::IconList(ConfigKey::well_known(
                    keys::MANIFEST_ICONS,
                )))
                .require(Requirement::NonEmpty(ConfigKey::well_known(
                    keys::MANIFEST_DISPLAY,
                )))
                .recommend(ConfigKey::well_known(keys::MANIFEST_NAME), None),
            Target::DesktopShell => common
                .require(Requirement::NonEmpty(ConfigKey::well_known(
                    keys::ELECTRON_BUNDLER,
                )))
                .recommend(
                    ConfigKey::well_known(keys::PACKAGER_BUNDLE_ID),
                    Some((
                        ConfigKey::well_known(keys::ELECTRON_BUNDLER),
                        Value::from("packager"),
                    )),
                )
                .recommend(
                    ConfigKey::well_known(keys::BUILDER_APP_ID),
                    Some((
                        ConfigKey::well_known(keys::ELECTRON_BUNDLER),
                        Value::from("builder"),
                    )),
                ),
            Target::MobileShell => {
                common.recommend(ConfigKey::well_known(keys::CORDOVA_ID), None)
            }
        }
    }

    pub fn require(mut self, requirement: Requirement) -> Self {
        self.mandatory.push(requirement);
        self
    }

    pub fn recommend(mut self, key: ConfigKey, when: Option<(ConfigKey, Value)>) -> Self {
        self.recommended.push(Recommendation { key, when });
        self
    }

    pub fn protect(mut self, key: ConfigKey) -> Self {
        if !self.protected.contains(&key) {
            self.protected.push(key);
        }
        self
    }
}
