//! Target projection: the slice of an effective configuration one backend
//! needs, plus derived values.

use std::collections::BTreeMap;

use serde_json::Value;
use tack_config::{EffectiveConfig, Environment, Target, defaults, keys};

use crate::config::{BundlerConfig, TargetConfig};
use crate::error::{Result, TargetError};
use crate::path::normalize_public_path;
use crate::target::{BuildTarget, for_target};
use crate::view::ConfigView;

/// Project `effective` for `target` using the built-in adapter.
pub fn project(effective: &EffectiveConfig, target: Target) -> Result<TargetConfig> {
    project_with(effective, for_target(target).as_ref())
}

/// Project `effective` through a specific adapter.
pub fn project_with(effective: &EffectiveConfig, adapter: &dyn BuildTarget) -> Result<TargetConfig> {
    if effective.target() != adapter.kind() {
        return Err(TargetError::TargetMismatch {
            resolved: effective.target(),
            requested: adapter.kind(),
        });
    }

    let view = ConfigView::new(effective);
    let public_path = if adapter.packaged() {
        String::new()
    } else {
        normalize_public_path(&view.string(keys::PUBLIC_PATH)?.unwrap_or_default())
    };

    let mut config = TargetConfig::new(
        adapter.kind(),
        effective.environment(),
        bundler_config(&view, public_path)?,
    );
    if effective.environment() == Environment::Development {
        config.dev_server = view.section(keys::DEV_SERVER)?;
    }
    adapter.project(&view, &mut config)?;

    tracing::debug!(
        build_target = adapter.name(),
        environment = %effective.environment(),
        public_path = %config.bundler.public_path,
        "projected target configuration"
    );
    Ok(config)
}

fn bundler_config(view: &ConfigView<'_>, public_path: String) -> Result<BundlerConfig> {
    let env: BTreeMap<String, Value> = view.section(keys::BUILD_ENV)?.unwrap_or_default();

    Ok(BundlerConfig {
        components: view.strings(keys::COMPONENTS)?,
        directives: view.strings(keys::DIRECTIVES)?,
        plugins: view.strings(keys::PLUGINS)?,
        plugin_options: view.table(keys::PLUGIN_OPTIONS),
        extras: view.strings(keys::EXTRAS)?,
        animations: view.strings(keys::ANIMATIONS)?,
        boot: view.strings(keys::BOOT)?,
        css: view.strings(keys::CSS)?,
        public_path,
        browser_targets: view.strings(keys::BROWSER_TARGETS)?,
        node_target: view.string(keys::NODE_TARGET)?,
        env,
        router_mode: view
            .string(keys::ROUTER_MODE)?
            .unwrap_or_else(|| defaults::ROUTER_MODE.to_string()),
        scope_hoisting: view.flag(keys::SCOPE_HOISTING, defaults::SCOPE_HOISTING)?,
        drop_console: view.flag(keys::DROP_CONSOLE, defaults::DROP_DEBUG_OUTPUT)?,
        drop_debugger: view.flag(keys::DROP_DEBUGGER, defaults::DROP_DEBUG_OUTPUT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tack_config::{EnvironmentContext, Resolver, parse_flags};

    fn resolve(pairs: &[(&str, &str)], target: Target) -> EffectiveConfig {
        Resolver::default().resolve(
            &EnvironmentContext::from_pairs(pairs.iter().copied()),
            target,
            &[],
        )
    }

    #[test]
    fn rejects_configuration_resolved_for_another_target() {
        let effective = resolve(&[], Target::Web);
        assert!(matches!(
            project(&effective, Target::Pwa),
            Err(TargetError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn dev_server_only_in_development() {
        let dev = project(&resolve(&[("APP_ENV", "development")], Target::Web), Target::Web).unwrap();
        let server = dev.dev_server.unwrap();
        assert_eq!(server.port, 8081);
        assert!(server.proxy["/api"].change_origin);

        let prod = project(&resolve(&[], Target::Web), Target::Web).unwrap();
        assert!(prod.dev_server.is_none());
        assert!(prod.bundler.drop_console);
    }

    #[test]
    fn dev_server_fields_fall_back_to_store_values() {
        let server: crate::config::DevServerConfig =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(server.port, defaults::DEV_SERVER_PORT);
        assert_eq!(server.port, 8081);
        assert!(server.open);
        assert!(server.proxy.is_empty());
    }

    #[test]
    fn shells_use_relative_public_path() {
        let effective = resolve(&[("APP_PUBLIC_PATH", "/ui/")], Target::DesktopShell);
        let config = project(&effective, Target::DesktopShell).unwrap();
        assert_eq!(config.bundler.public_path, "");
    }

    #[test]
    fn wrong_shape_is_reported_with_key() {
        let flags = parse_flags([], ["framework.plugins={\"a\":1}"]).unwrap();
        let effective = Resolver::default().resolve(&EnvironmentContext::default(), Target::Web, &flags);
        let err = project(&effective, Target::Web).unwrap_err();
        assert!(matches!(err, TargetError::InvalidSection { ref key, .. } if key == keys::PLUGINS));
    }
}
