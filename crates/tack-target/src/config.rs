//! Backend-facing configuration slices.
//!
//! A [`TargetConfig`] is what the bundler, the service-worker/manifest
//! generator and the platform packagers receive. Sections a target does not
//! use are `None` and omitted from the JSON output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tack_config::{Environment, Target, defaults};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetConfig {
    pub target: Target,
    pub environment: Environment,
    pub bundler: BundlerConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PwaManifest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_worker: Option<ServiceWorkerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub packager: Option<PackagerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<MobileConfig>,
}

impl TargetConfig {
    pub fn new(target: Target, environment: Environment, bundler: BundlerConfig) -> Self {
        Self {
            target,
            environment,
            bundler,
            dev_server: None,
            manifest: None,
            service_worker: None,
            packager: None,
            mobile: None,
        }
    }

    /// Pretty JSON for handing to external tooling.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Inputs for the bundler/transpiler pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundlerConfig {
    pub components: Vec<String>,
    pub directives: Vec<String>,
    pub plugins: Vec<String>,
    pub plugin_options: Value,
    pub extras: Vec<String>,
    pub animations: Vec<String>,
    pub boot: Vec<String>,
    pub css: Vec<String>,
    pub public_path: String,
    pub browser_targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_target: Option<String>,
    /// Values inlined into the bundle as `process.env.*`.
    pub env: BTreeMap<String, Value>,
    pub router_mode: String,
    pub scope_hoisting: bool,
    pub drop_console: bool,
    pub drop_debugger: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_open")]
    pub open: bool,

    #[serde(default)]
    pub proxy: BTreeMap<String, ProxyRule>,
}

fn default_port() -> u16 {
    defaults::DEV_SERVER_PORT
}

fn default_open() -> bool {
    defaults::DEV_SERVER_OPEN
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRule {
    pub target: String,

    #[serde(default)]
    pub change_origin: bool,
}

/// Web app manifest fields, in manifest naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PwaManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub display: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    /// Derived from the public path.
    #[serde(default)]
    pub start_url: String,

    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceWorkerConfig {
    pub workbox_mode: String,
    pub workbox_options: Value,
}

/// Which desktop packaging tool drives the shell build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellBundler {
    Packager,
    Builder,
}

/// Desktop-shell packaging inputs. Identity fields left `None` fall back to
/// the packager's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagerConfig {
    pub bundler: ShellBundler,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// The selected bundler's own option table, passed through.
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub options: Value,
}
