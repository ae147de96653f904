//! Desktop shell build target.

use tack_config::{Target, keys};

use crate::config::{PackagerConfig, ShellBundler, TargetConfig};
use crate::error::Result;
use crate::target::BuildTarget;
use crate::view::ConfigView;

/// Desktop shell wrapping the web bundle
///
/// Hands the selected packaging tool its option table. Identity fields are
/// optional; the packager applies its own defaults when they are absent.
pub struct DesktopShellTarget;

impl BuildTarget for DesktopShellTarget {
    fn kind(&self) -> Target {
        Target::DesktopShell
    }

    fn description(&self) -> &'static str {
        "desktop app packaged with electron-packager or electron-builder"
    }

    fn packaged(&self) -> bool {
        true
    }

    fn project(&self, view: &ConfigView<'_>, config: &mut TargetConfig) -> Result<()> {
        let bundler: ShellBundler = view.required_section(keys::ELECTRON_BUNDLER)?;
        let options = match bundler {
            ShellBundler::Packager => view.table(keys::ELECTRON_PACKAGER),
            ShellBundler::Builder => view.table(keys::ELECTRON_BUILDER),
        };

        config.packager = Some(PackagerConfig {
            bundler,
            app_bundle_id: view.string(keys::PACKAGER_BUNDLE_ID)?,
            app_id: view.string(keys::BUILDER_APP_ID)?,
            options,
        });
        Ok(())
    }
}
