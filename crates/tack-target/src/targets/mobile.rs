//! Mobile shell build target.

use tack_config::{Target, keys};

use crate::config::{MobileConfig, TargetConfig};
use crate::error::Result;
use crate::target::BuildTarget;
use crate::view::ConfigView;

/// Mobile shell wrapping the web bundle.
pub struct MobileShellTarget;

impl BuildTarget for MobileShellTarget {
    fn kind(&self) -> Target {
        Target::MobileShell
    }

    fn description(&self) -> &'static str {
        "mobile app packaged with cordova"
    }

    fn packaged(&self) -> bool {
        true
    }

    fn project(&self, view: &ConfigView<'_>, config: &mut TargetConfig) -> Result<()> {
        config.mobile = Some(MobileConfig {
            id: view.string(keys::CORDOVA_ID)?,
            options: view.table(keys::CORDOVA),
        });
        Ok(())
    }
}
