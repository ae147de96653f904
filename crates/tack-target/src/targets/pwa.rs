//! Progressive web app build target.

use serde_json::{Map, Value};
use tack_config::{Target, defaults, keys};

use crate::config::{PwaManifest, ServiceWorkerConfig, TargetConfig};
use crate::error::Result;
use crate::path::start_url;
use crate::target::BuildTarget;
use crate::view::ConfigView;

/// Progressive web app
///
/// Adds the web app manifest and the service-worker generator settings:
/// - manifest icons and display mode are required
/// - `start_url` is derived from the public path
/// - workbox mode falls back to `generateSW`
pub struct PwaTarget;

impl BuildTarget for PwaTarget {
    fn kind(&self) -> Target {
        Target::Pwa
    }

    fn description(&self) -> &'static str {
        "web app with manifest and service worker"
    }

    fn project(&self, view: &ConfigView<'_>, config: &mut TargetConfig) -> Result<()> {
        view.required(keys::MANIFEST_ICONS)?;
        view.required(keys::MANIFEST_DISPLAY)?;

        let mut manifest: PwaManifest = view.required_section(keys::MANIFEST)?;
        manifest.start_url = start_url(&config.bundler.public_path);

        let workbox_mode = view
            .string(keys::WORKBOX_MODE)?
            .unwrap_or_else(|| defaults::WORKBOX_MODE.to_string());
        let workbox_options = view
            .value(keys::WORKBOX_OPTIONS)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        config.manifest = Some(manifest);
        config.service_worker = Some(ServiceWorkerConfig {
            workbox_mode,
            workbox_options,
        });
        Ok(())
    }
}
