//! Resolution result paired with every issue found along the way.

use serde::Serialize;

use crate::resolve::EffectiveConfig;
use crate::validation::{IssueKind, Severity, ValidationIssue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub effective: EffectiveConfig,
    pub issues: Vec<ValidationIssue>,
}

impl Report {
    pub fn new(effective: EffectiveConfig, issues: Vec<ValidationIssue>) -> Self {
        Self { effective, issues }
    }

    /// Any error-severity issue means the build must not start.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// The effective configuration, or the issues if any of them is an error.
    pub fn into_result(self) -> Result<(EffectiveConfig, Vec<ValidationIssue>), Vec<ValidationIssue>> {
        if self.has_errors() {
            Err(self.issues)
        } else {
            Ok((self.effective, self.issues))
        }
    }
}
