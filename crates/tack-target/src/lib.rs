//! # tack-target
//!
//! Build target adapters for tack.
//!
//! Each target (web, pwa, desktop-shell, mobile-shell) declares what its
//! backend requires and projects an effective configuration into the
//! [`TargetConfig`] that backend consumes.

pub mod batch;
pub mod config;
pub mod detection;
pub mod error;
pub mod path;
pub mod projection;
pub mod target;
pub mod targets;
pub mod view;

pub use batch::{Resolved, resolve_all, resolve_target};
pub use config::*;
pub use detection::{detect_target, detect_targets};
pub use error::{Result, TargetError};
pub use path::{normalize_public_path, start_url};
pub use projection::{project, project_with};
pub use target::{BuildTarget, all_targets, for_target};
pub use targets::*;
pub use view::ConfigView;
