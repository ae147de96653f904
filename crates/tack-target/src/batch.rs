//! Resolve, validate and project several targets at once.

use rayon::prelude::*;
use tack_config::{EnvironmentContext, FlagOverride, Report, Resolver, Target};

use crate::config::TargetConfig;
use crate::error::TargetError;
use crate::projection::project;

/// Outcome for one target.
///
/// A failure for one target never hides another target's report.
#[derive(Debug)]
pub struct Resolved {
    pub report: Report,
    /// `None` when the report carries errors or projection failed.
    pub config: Option<TargetConfig>,
    /// Why a configuration without validation errors still could not be
    /// projected, e.g. a value of the wrong type.
    pub projection_error: Option<TargetError>,
}

impl Resolved {
    pub fn target(&self) -> Target {
        self.report.effective.target()
    }

    pub fn is_buildable(&self) -> bool {
        self.config.is_some()
    }

    /// Error-severity issues plus a projection failure, if any.
    pub fn error_count(&self) -> usize {
        self.report.errors().count() + usize::from(self.projection_error.is_some())
    }
}

/// Resolve, validate and, when valid, project one target.
pub fn resolve_target(
    resolver: &Resolver,
    context: &EnvironmentContext,
    target: Target,
    flags: &[FlagOverride],
) -> Resolved {
    let report = resolver.run(context, target, flags);
    if report.has_errors() {
        tracing::debug!(build_target = %target, errors = report.errors().count(), "skipping projection");
        return Resolved {
            report,
            config: None,
            projection_error: None,
        };
    }

    match project(&report.effective, target) {
        Ok(config) => Resolved {
            report,
            config: Some(config),
            projection_error: None,
        },
        Err(err) => {
            tracing::debug!(build_target = %target, error = %err, "projection failed");
            Resolved {
                report,
                config: None,
                projection_error: Some(err),
            }
        }
    }
}

/// [`resolve_target`] for each of `targets` in parallel.
///
/// Resolutions share nothing but the read-only inputs; results come back in
/// the order of `targets`.
pub fn resolve_all(
    resolver: &Resolver,
    context: &EnvironmentContext,
    targets: &[Target],
    flags: &[FlagOverride],
) -> Vec<Resolved> {
    targets
        .par_iter()
        .map(|&target| resolve_target(resolver, context, target, flags))
        .collect()
}
