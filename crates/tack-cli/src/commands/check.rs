//! Check command implementation.
//!
//! Resolves and validates without printing the configuration.

use tack_target::resolve_all;

use crate::cli::CheckArgs;
use crate::commands::utils::Session;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Discover the project file and build the overlay set
/// 2. Resolve and project every selected target
/// 3. Report issues, errors first, then projection failures
/// 4. With `--strict`, count warnings as errors
///
/// # Errors
///
/// Returns [`CliError::Validation`] when a target fails.
pub fn execute(args: CheckArgs) -> Result<()> {
    let session = Session::new(&args.options)?;
    let resolved = resolve_all(
        &session.resolver,
        &session.context,
        &session.targets,
        &session.flags,
    );

    let mut errors = 0;
    let mut failed = Vec::new();
    for result in &resolved {
        let target = result.target();
        let report = &result.report;
        ui::info(&format!(
            "Checking {target} ({})...",
            report.effective.environment()
        ));
        ui::print_issues(&report.issues);
        if let Some(err) = &result.projection_error {
            ui::print_projection_error(target, err);
        }

        let count = if args.strict {
            result.error_count() + report.warnings().count()
        } else {
            result.error_count()
        };
        if count == 0 {
            ui::success(&format!("{target} configuration is valid"));
        } else {
            ui::error(&format!("{target} configuration has {count} problem(s)"));
            errors += count;
            failed.push(target.to_string());
        }
    }

    if errors > 0 {
        return Err(CliError::Validation {
            errors,
            targets: failed.join(", "),
        });
    }
    Ok(())
}
