//! Resolve command implementation.

use serde_json::{Map, Value};
use tack_target::resolve_all;

use crate::cli::ResolveArgs;
use crate::commands::utils::Session;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the resolve command.
///
/// Prints one JSON document on stdout: the configuration itself for a single
/// target, or an object keyed by target name for `--target all`.
///
/// # Errors
///
/// Returns [`CliError::Validation`] if any target has error-severity issues
/// or could not be projected.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let session = Session::new(&args.options)?;
    tracing::info!(
        targets = session.targets.len(),
        environment = session.context.app_env(),
        "resolving configuration"
    );

    let resolved = resolve_all(
        &session.resolver,
        &session.context,
        &session.targets,
        &session.flags,
    );

    let mut documents = Vec::with_capacity(resolved.len());
    let mut errors = 0;
    let mut failed = Vec::new();
    for result in &resolved {
        let target = result.target();
        if resolved.len() > 1 && !result.report.issues.is_empty() {
            ui::info(&format!("{target}:"));
        }
        ui::print_issues(&result.report.issues);
        if let Some(err) = &result.projection_error {
            ui::print_projection_error(target, err);
        }

        let count = result.error_count();
        if count > 0 {
            errors += count;
            failed.push(target.to_string());
        }

        let document = if args.effective {
            serde_json::to_value(&result.report.effective)?
        } else {
            serde_json::to_value(&result.config)?
        };
        documents.push((target.to_string(), document));
    }

    let output = if documents.len() == 1 {
        documents.pop().map(|(_, document)| document).unwrap_or(Value::Null)
    } else {
        Value::Object(documents.into_iter().collect::<Map<String, Value>>())
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if errors > 0 {
        return Err(CliError::Validation {
            errors,
            targets: failed.join(", "),
        });
    }
    Ok(())
}
