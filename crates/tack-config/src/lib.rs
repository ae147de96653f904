//! Layered build configuration for web, pwa, desktop-shell and mobile-shell
//! targets.
//!
//! A [`Resolver`] merges the built-in defaults with environment overlays, the
//! [`EnvironmentContext`] values, target overlays and explicit
//! [`FlagOverride`]s, then validates the result against the target's
//! [`TargetDescriptor`].
//!
//! ```
//! use tack_config::{EnvironmentContext, Resolver, Target};
//!
//! let context = EnvironmentContext::from_pairs([("APP_ENV", "staging")]);
//! let report = Resolver::default().run(&context, Target::Web, &[]);
//! assert!(!report.has_errors());
//! ```

pub mod defaults;
pub mod discovery;
pub mod env;
pub mod error;
pub mod key;
pub mod merge;
pub mod overlay;
pub mod report;
pub mod resolve;
pub mod target;
pub mod tree;
pub mod validation;

pub use defaults::defaults;
pub use discovery::{discover, ConfigDiscovery, OverlaySpec, ProjectFile};
pub use env::{Environment, EnvironmentContext, EnvironmentSelection};
pub use error::{ConfigError, Result};
pub use key::{keys, ConfigKey};
pub use merge::{Assignment, Trace};
pub use overlay::{Activation, FlagOverride, MergeMode, Overlay, OverlaySet, Stage};
pub use report::Report;
pub use resolve::{parse_flags, resolve, EffectiveConfig, Resolver};
pub use target::{Recommendation, Requirement, Target, TargetDescriptor};
pub use tree::ConfigTree;
pub use validation::{
    validate, ConfigCheck, IssueKind, Severity, ValidationIssue, Validator,
};
