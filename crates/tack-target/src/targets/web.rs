//! Web (SPA) build target.

use tack_config::Target;

use crate::config::TargetConfig;
use crate::error::Result;
use crate::target::BuildTarget;
use crate::view::ConfigView;

/// Single-page app served over HTTP
///
/// Only the shared bundler section applies.
pub struct WebTarget;

impl BuildTarget for WebTarget {
    fn kind(&self) -> Target {
        Target::Web
    }

    fn description(&self) -> &'static str {
        "single-page app served over HTTP"
    }

    fn project(&self, _view: &ConfigView<'_>, _config: &mut TargetConfig) -> Result<()> {
        Ok(())
    }
}
