//! Built-in build targets.

pub mod desktop;
pub mod mobile;
pub mod pwa;
pub mod web;

pub use desktop::DesktopShellTarget;
pub use mobile::MobileShellTarget;
pub use pwa::PwaTarget;
pub use web::WebTarget;
