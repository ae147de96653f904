//! BuildTarget trait.

use tack_config::{Target, TargetDescriptor};

use crate::config::TargetConfig;
use crate::error::Result;
use crate::targets::{DesktopShellTarget, MobileShellTarget, PwaTarget, WebTarget};
use crate::view::ConfigView;

/// A backend that consumes a projected [`TargetConfig`].
///
/// Implementations declare what the backend requires and fill in the
/// sections only they understand; the shared bundler section is built
/// before [`project`](BuildTarget::project) runs.
pub trait BuildTarget: Send + Sync {
    fn kind(&self) -> Target;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// One-line summary for listings.
    fn description(&self) -> &'static str;

    fn descriptor(&self) -> TargetDescriptor {
        TargetDescriptor::for_target(self.kind())
    }

    /// Packaged apps load from the filesystem and get a relative public path.
    fn packaged(&self) -> bool {
        false
    }

    fn project(&self, view: &ConfigView<'_>, config: &mut TargetConfig) -> Result<()>;
}

/// The built-in adapter for `target`.
pub fn for_target(target: Target) -> Box<dyn BuildTarget> {
    match target {
        Target::Web => Box::new(WebTarget),
        Target::Pwa => Box::new(PwaTarget),
        Target::DesktopShell => Box::new(DesktopShellTarget),
        Target::MobileShell => Box::new(MobileShellTarget),
    }
}

/// Every built-in adapter, in declaration order.
pub fn all_targets() -> Vec<Box<dyn BuildTarget>> {
    Target::ALL.into_iter().map(for_target).collect()
}
