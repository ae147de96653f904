//! Override layer engine.
//!
//! Resolution order: defaults, environment overlays (plus the environment
//! context values), target overlays, explicit flags. The result is an
//! immutable [`EffectiveConfig`] for one (environment, target) pair.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::defaults::defaults;
use crate::env::{self, Environment, EnvironmentContext, EnvironmentSelection};
use crate::error::Result;
use crate::key::{ConfigKey, keys};
use crate::merge::{Trace, apply_overlay};
use crate::overlay::{Activation, FlagOverride, MergeMode, Overlay, OverlaySet, Stage};
use crate::report::Report;
use crate::target::{Target, TargetDescriptor};
use crate::tree::ConfigTree;
use crate::validation::{IssueKind, ValidationIssue, Validator};

/// Fully merged configuration for one (environment, target) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    environment: Environment,
    target: Target,
    applied: Vec<String>,
    config: ConfigTree,
    trace: Trace,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<ValidationIssue>,
}

impl EffectiveConfig {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Names of the overlays applied, in application order.
    pub fn applied_overlays(&self) -> &[String] {
        &self.applied
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.config
    }

    pub fn get(&self, key: &ConfigKey) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn get_str(&self, key: &ConfigKey) -> Option<&str> {
        self.config.get_str(key)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Issues raised while resolving, before validation (e.g. an unknown
    /// `APP_ENV`).
    pub fn resolution_issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Canonical JSON rendering; identical inputs give identical bytes.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Resolves effective configurations from a defaults tree and a set of
/// candidate overlays.
#[derive(Debug, Clone)]
pub struct Resolver {
    defaults: ConfigTree,
    overlays: OverlaySet,
    validator_protected: Vec<ConfigKey>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(defaults())
    }
}

impl Resolver {
    /// Resolver with the built-in overlays.
    pub fn new(defaults: ConfigTree) -> Self {
        Self::with_overlays(defaults, OverlaySet::builtin())
    }

    pub fn with_overlays(defaults: ConfigTree, overlays: OverlaySet) -> Self {
        Self {
            defaults,
            overlays,
            validator_protected: Vec::new(),
        }
    }

    /// Treat `key` as protected in addition to the global set.
    pub fn protect(mut self, key: ConfigKey) -> Self {
        if !self.validator_protected.contains(&key) {
            self.validator_protected.push(key);
        }
        self
    }

    pub fn add_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn defaults(&self) -> &ConfigTree {
        &self.defaults
    }

    pub fn resolve(
        &self,
        context: &EnvironmentContext,
        target: Target,
        flags: &[FlagOverride],
    ) -> EffectiveConfig {
        let selection = context.selection();
        let environment = selection.environment();
        let mut issues = Vec::new();

        if let EnvironmentSelection::Unknown { raw, fallback } = &selection {
            tracing::warn!(
                app_env = %raw,
                fallback = %fallback,
                "unrecognized APP_ENV, using {fallback} settings"
            );
            issues.push(ValidationIssue::warning(
                IssueKind::UnknownEnvironment,
                ConfigKey::well_known(keys::APP_ENV),
                format!("unknown environment '{raw}', treated as {fallback}"),
            ));
        }

        let base = Overlay::new(
            "defaults",
            Activation::Always,
            self.defaults.clone(),
        );
        let mut plan: Vec<Overlay> = self
            .overlays
            .selected(environment, target)
            .into_iter()
            .cloned()
            .collect();
        let context_at = plan.partition_point(|o| o.stage() <= Stage::Environment);
        plan.insert(context_at, context_overlay(context, environment));
        plan.insert(0, base);
        plan.extend(flags.iter().map(FlagOverride::to_overlay));

        let mut tree = ConfigTree::new();
        let mut trace = Trace::default();
        let mut applied = Vec::with_capacity(plan.len());
        for overlay in &plan {
            apply_overlay(tree.value_mut(), overlay, &mut trace);
            applied.push(overlay.name().to_string());
        }

        tracing::debug!(
            %environment,
            %target,
            overlays = applied.len(),
            keys = trace.len(),
            "resolved configuration"
        );

        EffectiveConfig {
            environment,
            target,
            applied,
            config: tree,
            trace,
            issues,
        }
    }

    /// Resolve and validate in one step.
    pub fn run(
        &self,
        context: &EnvironmentContext,
        target: Target,
        flags: &[FlagOverride],
    ) -> Report {
        let descriptor = self
            .validator_protected
            .iter()
            .cloned()
            .fold(TargetDescriptor::for_target(target), TargetDescriptor::protect);
        self.run_with(context, &descriptor, flags)
    }

    /// Resolve for `descriptor.target` and validate against `descriptor`.
    pub fn run_with(
        &self,
        context: &EnvironmentContext,
        descriptor: &TargetDescriptor,
        flags: &[FlagOverride],
    ) -> Report {
        let effective = self.resolve(context, descriptor.target, flags);
        let mut issues = effective.resolution_issues().to_vec();
        issues.extend(Validator::default().validate(&effective, descriptor));
        Report::new(effective, issues)
    }
}

/// Environment-stage values taken from the context snapshot.
fn context_overlay(context: &EnvironmentContext, environment: Environment) -> Overlay {
    let mut build_env = Map::new();
    build_env.insert(env::APP_ENV.to_string(), json!(environment.as_str()));
    build_env.insert(env::APP_API.to_string(), json!(context.api()));

    let patch = json!({
        "build": {
            "env": build_env,
            "publicPath": context.public_path()
        }
    });

    Overlay::new(
        "environment-context",
        Activation::Environment(environment),
        ConfigTree::from_value(patch).unwrap_or_default(),
    )
}

/// Resolve with the built-in overlays.
pub fn resolve(
    defaults: &ConfigTree,
    context: &EnvironmentContext,
    target: Target,
    flags: &[FlagOverride],
) -> EffectiveConfig {
    Resolver::new(defaults.clone()).resolve(context, target, flags)
}

/// Parse `KEY=VALUE` flag specs into overrides.
pub fn parse_flags<'a>(
    merges: impl IntoIterator<Item = &'a str>,
    replaces: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<FlagOverride>> {
    let mut flags = Vec::new();
    for spec in merges {
        flags.push(FlagOverride::parse(spec, MergeMode::Merge)?);
    }
    for spec in replaces {
        flags.push(FlagOverride::parse(spec, MergeMode::Replace)?);
    }
    Ok(flags)
}
