//! File-based project overlays for CLI use
//!
//! Finds `tack.toml` (or a `tack` field in `package.json`) and turns it into
//! overlays layered on top of the built-in ones.
//!
//! ```toml
//! [defaults]
//! framework.plugins = ["Meta"]
//!
//! [environments.development]
//! devServer.port = 9000
//!
//! [targets.pwa]
//! pwa.manifest.name = "Console"
//!
//! [[overlays]]
//! name = "slim"
//! when = { target = "web" }
//! mode = "replace"
//! patch = { framework = { components = ["QBtn"] } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::env::Environment;
use crate::error::{ConfigError, Result};
use crate::overlay::{Activation, MergeMode, Overlay, OverlaySet};
use crate::target::Target;
use crate::tree::ConfigTree;

pub const CONFIG_FILE: &str = "tack.toml";
const PACKAGE_FIELD: &str = "tack";

/// Parsed project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    #[serde(default)]
    pub defaults: Value,

    #[serde(default)]
    pub environments: BTreeMap<String, Value>,

    #[serde(default)]
    pub targets: BTreeMap<String, Value>,

    #[serde(default)]
    pub overlays: Vec<OverlaySpec>,
}

/// An explicitly declared overlay.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlaySpec {
    pub name: String,

    #[serde(default)]
    pub when: Activation,

    #[serde(default)]
    pub mode: MergeMode,

    #[serde(default)]
    pub patch: Value,
}

impl ProjectFile {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "project".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert into overlays, named `project:<section>`.
    pub fn into_overlays(self) -> Result<Vec<Overlay>> {
        let mut overlays = Vec::new();

        if !self.defaults.is_null() {
            overlays.push(Overlay::new(
                "project:defaults",
                Activation::Always,
                patch_tree("project:defaults", self.defaults)?,
            ));
        }

        for (name, patch) in self.environments {
            let environment: Environment = name.parse()?;
            let overlay_name = format!("project:env:{environment}");
            let patch = patch_tree(&overlay_name, patch)?;
            overlays.push(Overlay::new(
                overlay_name,
                Activation::Environment(environment),
                patch,
            ));
        }

        for (name, patch) in self.targets {
            let target: Target = name.parse()?;
            let overlay_name = format!("project:target:{target}");
            let patch = patch_tree(&overlay_name, patch)?;
            overlays.push(Overlay::new(overlay_name, Activation::Target(target), patch));
        }

        for spec in self.overlays {
            let overlay_name = format!("project:{}", spec.name);
            let patch = patch_tree(&overlay_name, spec.patch)?;
            overlays.push(Overlay::new(overlay_name, spec.when, patch).with_mode(spec.mode));
        }

        Ok(overlays)
    }
}

fn patch_tree(name: &str, value: Value) -> Result<ConfigTree> {
    ConfigTree::from_value(value).map_err(|err| ConfigError::InvalidOverlay {
        name: name.to_string(),
        message: err.hint().unwrap_or("patch must be a table").to_string(),
    })
}

/// File-based project configuration discovery
///
/// # Example
///
/// ```no_run
/// use tack_config::ConfigDiscovery;
///
/// let overlays = ConfigDiscovery::new(".").overlay_set().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a project file in the root directory
    ///
    /// Searches in this order:
    /// 1. tack.toml
    /// 2. package.json (tack field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load the discovered project file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no project file is found.
    pub fn load(&self) -> Result<ProjectFile> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Like [`load`](Self::load), but a missing file is not an error.
    pub fn load_optional(&self) -> Result<Option<ProjectFile>> {
        match self.find() {
            Some(path) => self.load_from(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Built-in overlays followed by the project's own.
    pub fn overlay_set(&self) -> Result<OverlaySet> {
        let mut set = OverlaySet::builtin();
        if let Some(project) = self.load_optional()? {
            let overlays = project.into_overlays()?;
            tracing::debug!(
                count = overlays.len(),
                root = %self.root.display(),
                "loaded project overlays"
            );
            set.extend(overlays);
        }
        Ok(set)
    }

    fn load_from(&self, path: &Path) -> Result<ProjectFile> {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = read(path)?;

        let toml_val: toml::Value =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "toml".to_string(),
                hint: Some(format!("Invalid TOML syntax: {}", e)),
            })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {}", e)),
        })?;

        ProjectFile::from_value(value)
    }

    fn load_from_package_json(&self, path: &Path) -> Result<ProjectFile> {
        let content = read(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        let section = parsed
            .get(PACKAGE_FIELD)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: PACKAGE_FIELD.to_string(),
                hint: Some("Add a 'tack' field to your package.json".to_string()),
            })?;

        ProjectFile::from_value(section.clone())
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Convenience: built-in plus project overlays for `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<OverlaySet> {
    ConfigDiscovery::new(root).overlay_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sections_become_named_overlays() {
        let project = ProjectFile::from_value(json!({
            "defaults": { "framework": { "plugins": ["Meta"] } },
            "environments": { "staging": { "devServer": { "port": 9000 } } },
            "targets": { "pwa": { "pwa": { "manifest": { "name": "Console" } } } },
            "overlays": [{
                "name": "slim",
                "when": { "target": "web" },
                "mode": "replace",
                "patch": { "framework": { "components": ["QBtn"] } }
            }]
        }))
        .unwrap();

        let overlays = project.into_overlays().unwrap();
        let names: Vec<&str> = overlays.iter().map(Overlay::name).collect();
        assert_eq!(
            names,
            vec![
                "project:defaults",
                "project:env:staging",
                "project:target:pwa",
                "project:slim"
            ]
        );
        assert_eq!(overlays[3].mode(), MergeMode::Replace);
        assert_eq!(overlays[3].activation(), Activation::Target(Target::Web));
    }

    #[test]
    fn unknown_section_names_are_errors() {
        let project = ProjectFile::from_value(json!({ "targets": { "ssr": {} } })).unwrap();
        assert!(matches!(
            project.into_overlays(),
            Err(ConfigError::UnknownTarget(_))
        ));

        let project = ProjectFile::from_value(json!({ "environments": { "qa": {} } })).unwrap();
        assert!(matches!(
            project.into_overlays(),
            Err(ConfigError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn non_table_patch_is_rejected() {
        let project = ProjectFile::from_value(json!({
            "overlays": [{ "name": "bad", "patch": [1, 2] }]
        }))
        .unwrap();
        assert!(matches!(
            project.into_overlays(),
            Err(ConfigError::InvalidOverlay { .. })
        ));
    }

    #[test]
    fn unknown_top_level_fields_are_rejected() {
        assert!(ProjectFile::from_value(json!({ "profiles": {} })).is_err());
    }
}
