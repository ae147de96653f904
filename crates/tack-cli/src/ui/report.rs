//! Rendering of validation issues.

use owo_colors::{OwoColorize, Style};
use tack_config::{Severity, Target, ValidationIssue};
use tack_target::TargetError;

use super::paint;

/// Print one issue as `error[Kind] key: message`.
pub fn print_issue(issue: &ValidationIssue) {
    let (label, style) = match issue.severity {
        Severity::Error => ("error", Style::new().red().bold()),
        Severity::Warning => ("warning", Style::new().yellow().bold()),
    };
    let label = format!("{label}[{}]", issue.kind.as_str());
    eprintln!(
        "{} {}: {}",
        label.style(paint(style)),
        issue.key.style(paint(Style::new().bold())),
        issue.message
    );
}

/// Print every issue, errors first, then a one-line tally.
pub fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }

    let mut sorted: Vec<&ValidationIssue> = issues.iter().collect();
    // stable: keeps validator order within a severity
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
    for issue in sorted {
        print_issue(issue);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    eprintln!("{} error(s), {} warning(s)", errors, issues.len() - errors);
}

/// Print why a target without validation errors could not be projected.
pub fn print_projection_error(target: Target, err: &TargetError) {
    eprintln!(
        "{} {}: {}",
        "error[Projection]".style(paint(Style::new().red().bold())),
        target.style(paint(Style::new().bold())),
        err
    );
    if let Some(hint) = projection_hint(err) {
        eprintln!("  help: {hint}");
    }
}

fn projection_hint(err: &TargetError) -> Option<String> {
    match err {
        TargetError::MissingField { target, key } => Some(format!(
            "Set it in tack.toml under [targets.{target}] or with --set {key}=..."
        )),
        TargetError::InvalidSection { key, .. } => {
            Some(format!("Check the value types under '{key}' (tack explain {key})"))
        }
        _ => None,
    }
}
