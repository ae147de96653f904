//! Named, predicated configuration patches.
//!
//! Overlays are applied in stage order: defaults, environment, target, then
//! explicit flags. Within a stage they keep insertion order, so built-in
//! overlays always run before the ones a project file adds.

mod builtin;
mod flags;

use serde::{Deserialize, Serialize};

use crate::env::Environment;
use crate::target::Target;
use crate::tree::ConfigTree;

pub use flags::FlagOverride;

/// Priority band an overlay belongs to. Later stages win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Defaults,
    Environment,
    Target,
    Explicit,
}

/// How an overlay treats collections it touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Union collections (first-seen order, no duplicates); scalars last-wins.
    #[default]
    Merge,
    /// Discard whatever value the overlay names.
    Replace,
}

/// When an overlay takes part in a resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Always,
    Environment(Environment),
    Target(Target),
}

impl Activation {
    pub fn stage(self) -> Stage {
        match self {
            Activation::Always => Stage::Defaults,
            Activation::Environment(_) => Stage::Environment,
            Activation::Target(_) => Stage::Target,
        }
    }

    pub fn matches(self, environment: Environment, target: Target) -> bool {
        match self {
            Activation::Always => true,
            Activation::Environment(env) => env == environment,
            Activation::Target(t) => t == target,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    name: String,
    activation: Activation,
    stage: Stage,
    mode: MergeMode,
    patch: ConfigTree,
}

impl Overlay {
    /// Overlay whose stage follows from its activation predicate.
    pub fn new(name: impl Into<String>, activation: Activation, patch: ConfigTree) -> Self {
        Self {
            name: name.into(),
            activation,
            stage: activation.stage(),
            mode: MergeMode::Merge,
            patch,
        }
    }

    pub fn for_environment(environment: Environment, patch: ConfigTree) -> Self {
        Self::new(
            format!("env:{environment}"),
            Activation::Environment(environment),
            patch,
        )
    }

    pub fn for_target(target: Target, patch: ConfigTree) -> Self {
        Self::new(format!("target:{target}"), Activation::Target(target), patch)
    }

    /// Highest-priority overlay, always active.
    pub fn explicit(name: impl Into<String>, patch: ConfigTree) -> Self {
        Self {
            stage: Stage::Explicit,
            ..Self::new(name, Activation::Always, patch)
        }
    }

    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    pub fn patch(&self) -> &ConfigTree {
        &self.patch
    }
}

/// Ordered collection of candidate overlays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySet {
    overlays: Vec<Overlay>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The environment and target overlays every resolution starts with.
    pub fn builtin() -> Self {
        Self {
            overlays: builtin::overlays(),
        }
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn with(mut self, overlay: Overlay) -> Self {
        self.push(overlay);
        self
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    /// Overlays active for this pair, in application order.
    pub fn selected(&self, environment: Environment, target: Target) -> Vec<&Overlay> {
        let mut selected: Vec<&Overlay> = self
            .overlays
            .iter()
            .filter(|overlay| overlay.activation.matches(environment, target))
            .collect();
        // stable: insertion order survives within a stage
        selected.sort_by_key(|overlay| overlay.stage);
        selected
    }
}

impl Extend<Overlay> for OverlaySet {
    fn extend<T: IntoIterator<Item = Overlay>>(&mut self, iter: T) {
        self.overlays.extend(iter);
    }
}

impl FromIterator<Overlay> for OverlaySet {
    fn from_iter<T: IntoIterator<Item = Overlay>>(iter: T) -> Self {
        Self {
            overlays: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_decides_stage() {
        assert_eq!(Activation::Always.stage(), Stage::Defaults);
        assert_eq!(
            Activation::Environment(Environment::Staging).stage(),
            Stage::Environment
        );
        assert_eq!(Activation::Target(Target::Pwa).stage(), Stage::Target);
        assert_eq!(
            Overlay::explicit("cli", ConfigTree::new()).stage(),
            Stage::Explicit
        );
    }

    #[test]
    fn selection_orders_by_stage_then_insertion() {
        let set = OverlaySet::new()
            .with(Overlay::for_target(Target::Pwa, ConfigTree::new()))
            .with(Overlay::new("project:a", Activation::Always, ConfigTree::new()))
            .with(Overlay::for_environment(Environment::Production, ConfigTree::new()))
            .with(Overlay::new("project:b", Activation::Always, ConfigTree::new()))
            .with(Overlay::for_target(Target::Web, ConfigTree::new()));

        let names: Vec<&str> = set
            .selected(Environment::Production, Target::Pwa)
            .into_iter()
            .map(Overlay::name)
            .collect();
        assert_eq!(
            names,
            vec!["project:a", "project:b", "env:production", "target:pwa"]
        );
    }

    #[test]
    fn builtin_set_has_one_overlay_per_environment_and_target() {
        let set = OverlaySet::builtin();
        for environment in Environment::ALL {
            for target in Target::ALL {
                let selected = set.selected(environment, target);
                assert_eq!(selected.len(), 2, "{environment}/{target}");
            }
        }
    }

    #[test]
    fn activation_deserializes_from_table() {
        let activation: Activation =
            serde_json::from_value(serde_json::json!({ "target": "desktop-shell" })).unwrap();
        assert_eq!(activation, Activation::Target(Target::DesktopShell));
        let always: Activation = serde_json::from_value(serde_json::json!("always")).unwrap();
        assert_eq!(always, Activation::Always);
    }
}
