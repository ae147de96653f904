//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => match e.hint() {
            Some(hint) => miette::miette!(help = hint.to_string(), "Configuration error: {}", e),
            None => miette::miette!("Configuration error: {}", e),
        },
        CliError::Validation { .. } => miette::miette!(
            help = "Fix the issues listed above, or override them with --set / --replace",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
