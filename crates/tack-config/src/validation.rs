//! Pluggable checks over a resolved configuration.
//!
//! Checks never mutate what they inspect and never stop early: every problem
//! is collected so a single run reports all of them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env::Environment;
use crate::key::{ConfigKey, keys};
use crate::overlay::{MergeMode, Stage};
use crate::resolve::EffectiveConfig;
use crate::target::{Requirement, TargetDescriptor};
use crate::tree::{describe, is_empty_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    MissingMandatoryField,
    ConflictingProtectedKey,
    InvalidEnumValue,
    UnknownEnvironment,
    MissingRecommendedField,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingMandatoryField => "MissingMandatoryField",
            IssueKind::ConflictingProtectedKey => "ConflictingProtectedKey",
            IssueKind::InvalidEnumValue => "InvalidEnumValue",
            IssueKind::UnknownEnvironment => "UnknownEnvironment",
            IssueKind::MissingRecommendedField => "MissingRecommendedField",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub key: ConfigKey,
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(kind: IssueKind, key: ConfigKey, message: impl Into<String>) -> Self {
        Self {
            key,
            severity: Severity::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: IssueKind, key: ConfigKey, message: impl Into<String>) -> Self {
        Self {
            key,
            severity: Severity::Warning,
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "{severity}[{}] {}: {}",
            self.kind.as_str(),
            self.key,
            self.message
        )
    }
}

/// Keys whose value must agree across every overlay that sets them.
pub const PROTECTED_KEYS: &[&str] = &[keys::ROUTER_MODE, keys::WORKBOX_MODE];

/// A key restricted to a fixed set of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRule {
    pub key: ConfigKey,
    pub allowed: Vec<&'static str>,
}

impl EnumRule {
    pub fn new(key: &'static str, allowed: &[&'static str]) -> Self {
        Self {
            key: ConfigKey::well_known(key),
            allowed: allowed.to_vec(),
        }
    }
}

/// Enumerations every resolved configuration must respect.
pub fn enum_rules() -> Vec<EnumRule> {
    let environments: Vec<&'static str> = Environment::ALL.iter().map(|e| e.as_str()).collect();
    vec![
        EnumRule::new(keys::ROUTER_MODE, &["hash", "history"]),
        EnumRule::new(keys::APP_ENV, &environments),
        EnumRule::new(keys::WORKBOX_MODE, &["generateSW", "injectManifest"]),
        EnumRule::new(
            keys::MANIFEST_DISPLAY,
            &["fullscreen", "standalone", "minimal-ui", "browser"],
        ),
        EnumRule::new(
            keys::MANIFEST_ORIENTATION,
            &[
                "any",
                "natural",
                "landscape",
                "portrait",
                "portrait-primary",
                "portrait-secondary",
                "landscape-primary",
                "landscape-secondary",
            ],
        ),
        EnumRule::new(keys::ELECTRON_BUNDLER, &["packager", "builder"]),
    ]
}

/// A single validation pass.
pub trait ConfigCheck {
    fn check(
        &self,
        config: &EffectiveConfig,
        descriptor: &TargetDescriptor,
        issues: &mut Vec<ValidationIssue>,
    );
}

/// Mandatory keys present and well-formed; recommended keys reported.
pub struct MandatoryFields;

impl ConfigCheck for MandatoryFields {
    fn check(
        &self,
        config: &EffectiveConfig,
        descriptor: &TargetDescriptor,
        issues: &mut Vec<ValidationIssue>,
    ) {
        for requirement in &descriptor.mandatory {
            let key = requirement.key();
            let value = config.get(key);
            if value.is_none_or(is_empty_value) {
                issues.push(ValidationIssue::error(
                    IssueKind::MissingMandatoryField,
                    key.clone(),
                    format!("'{key}' is required for the {} target", descriptor.target),
                ));
                continue;
            }

            if let (Requirement::IconList(_), Some(value)) = (requirement, value) {
                check_icons(key, value, issues);
            }
        }

        for recommendation in &descriptor.recommended {
            let applies = match &recommendation.when {
                Some((key, expected)) => config.get(key) == Some(expected),
                None => true,
            };
            if applies && config.get(&recommendation.key).is_none_or(is_empty_value) {
                issues.push(ValidationIssue::warning(
                    IssueKind::MissingRecommendedField,
                    recommendation.key.clone(),
                    format!(
                        "'{}' is not set; the {} backend will use its own default",
                        recommendation.key, descriptor.target
                    ),
                ));
            }
        }
    }
}

fn check_icons(key: &ConfigKey, value: &Value, issues: &mut Vec<ValidationIssue>) {
    let Some(icons) = value.as_array() else {
        issues.push(ValidationIssue::error(
            IssueKind::MissingMandatoryField,
            key.clone(),
            format!("expected a list of icons, found {}", describe(value)),
        ));
        return;
    };

    for (index, icon) in icons.iter().enumerate() {
        let entry = key.child(index);
        if !icon.is_object() {
            issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry,
                format!("icon entry must be a table, found {}", describe(icon)),
            ));
            continue;
        }

        let field = |name: &str| icon.get(name).and_then(Value::as_str).map(str::trim);

        if field("src").is_none_or(str::is_empty) {
            issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry.child("src"),
                "icon is missing 'src'",
            ));
        }

        match field("sizes") {
            Some(sizes) if valid_icon_sizes(sizes) => {}
            Some(sizes) => issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry.child("sizes"),
                format!("'{sizes}' is not a valid size list (expected e.g. '192x192' or 'any')"),
            )),
            None => issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry.child("sizes"),
                "icon is missing 'sizes'",
            )),
        }

        match field("type") {
            Some(mime) if mime.starts_with("image/") && mime.len() > "image/".len() => {}
            Some(mime) => issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry.child("type"),
                format!("'{mime}' is not an image MIME type"),
            )),
            None => issues.push(ValidationIssue::error(
                IssueKind::MissingMandatoryField,
                entry.child("type"),
                "icon is missing 'type'",
            )),
        }
    }
}

/// `any`, or a space-separated list of `WxH` pairs.
pub fn valid_icon_sizes(sizes: &str) -> bool {
    if sizes.eq_ignore_ascii_case("any") {
        return true;
    }
    let mut pairs = sizes.split_whitespace().peekable();
    pairs.peek().is_some()
        && pairs.all(|pair| {
            let Some((w, h)) = pair.split_once(['x', 'X']) else {
                return false;
            };
            !w.is_empty()
                && !h.is_empty()
                && w.bytes().all(|b| b.is_ascii_digit())
                && h.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Protected keys must agree across every non-default overlay that sets them.
///
/// An explicit `replace` override is a deliberate choice and is exempt.
pub struct ProtectedKeys {
    keys: Vec<ConfigKey>,
}

impl Default for ProtectedKeys {
    fn default() -> Self {
        Self {
            keys: PROTECTED_KEYS.iter().copied().map(ConfigKey::well_known).collect(),
        }
    }
}

impl ConfigCheck for ProtectedKeys {
    fn check(
        &self,
        config: &EffectiveConfig,
        descriptor: &TargetDescriptor,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let extra = descriptor
            .protected
            .iter()
            .filter(|key| !self.keys.contains(key));

        for key in self.keys.iter().chain(extra) {
            let contenders: Vec<(&str, &Value)> = config
                .trace()
                .assignments(key)
                .iter()
                .filter(|a| a.stage != Stage::Defaults)
                .filter(|a| !(a.stage == Stage::Explicit && a.mode == MergeMode::Replace))
                .map(|a| (a.overlay.as_str(), &a.value))
                .collect();

            let mut distinct: Vec<&Value> = Vec::new();
            for &(_, value) in &contenders {
                if !distinct.contains(&value) {
                    distinct.push(value);
                }
            }
            if distinct.len() < 2 {
                continue;
            }

            let detail = contenders
                .iter()
                .map(|(overlay, value)| format!("{overlay} = {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            issues.push(ValidationIssue::error(
                IssueKind::ConflictingProtectedKey,
                key.clone(),
                format!("overlays disagree on protected key: {detail}"),
            ));
        }
    }
}

/// Enumerated keys hold one of their declared values.
pub struct EnumeratedValues {
    rules: Vec<EnumRule>,
}

impl Default for EnumeratedValues {
    fn default() -> Self {
        Self {
            rules: enum_rules(),
        }
    }
}

impl ConfigCheck for EnumeratedValues {
    fn check(
        &self,
        config: &EffectiveConfig,
        _descriptor: &TargetDescriptor,
        issues: &mut Vec<ValidationIssue>,
    ) {
        for rule in &self.rules {
            let Some(value) = config.get(&rule.key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let valid = value
                .as_str()
                .is_some_and(|s| rule.allowed.iter().any(|allowed| *allowed == s));
            if !valid {
                issues.push(ValidationIssue::error(
                    IssueKind::InvalidEnumValue,
                    rule.key.clone(),
                    format!("{value} is not one of: {}", rule.allowed.join(", ")),
                ));
            }
        }
    }
}

/// Runs the checks in order: mandatory fields, protected keys, enumerations.
pub struct Validator {
    checks: Vec<Box<dyn ConfigCheck + Send + Sync>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            checks: vec![
                Box::new(MandatoryFields),
                Box::new(ProtectedKeys::default()),
                Box::new(EnumeratedValues::default()),
            ],
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a custom check, run after the built-in ones.
    pub fn with_check(mut self, check: impl ConfigCheck + Send + Sync + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn validate(
        &self,
        config: &EffectiveConfig,
        descriptor: &TargetDescriptor,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for check in &self.checks {
            check.check(config, descriptor, &mut issues);
        }
        issues
    }
}

/// Validate with the built-in checks.
pub fn validate(config: &EffectiveConfig, descriptor: &TargetDescriptor) -> Vec<ValidationIssue> {
    Validator::default().validate(config, descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_size_lists() {
        assert!(valid_icon_sizes("192x192"));
        assert!(valid_icon_sizes("16x16 32x32"));
        assert!(valid_icon_sizes("any"));
        assert!(!valid_icon_sizes(""));
        assert!(!valid_icon_sizes("192"));
        assert!(!valid_icon_sizes("x192"));
        assert!(!valid_icon_sizes("192xbig"));
    }

    #[test]
    fn issue_display_includes_kind_and_key() {
        let issue = ValidationIssue::error(
            IssueKind::MissingMandatoryField,
            ConfigKey::well_known(keys::MANIFEST_ICONS),
            "missing",
        );
        assert_eq!(
            issue.to_string(),
            "error[MissingMandatoryField] pwa.manifest.icons: missing"
        );
        assert!(issue.is_error());
    }

    #[test]
    fn severities_order_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
    }
}
