//! Command-line interface definition for tack.
//!
//! # Command Structure
//!
//! - `tack resolve` - Print the projected configuration as JSON
//! - `tack check` - Validate without printing the configuration
//! - `tack explain` - Show which overlays set a key
//! - `tack targets` - List build targets and their requirements

mod commands;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, ExplainArgs, ResolveArgs, ResolveOptions, TargetsArgs};
pub use validation::{TargetSelection, parse_assignment, parse_target_selection};

/// tack - layered build configuration for web, pwa and shell targets
#[derive(Parser, Debug)]
#[command(
    name = "tack",
    version,
    about = "Resolve layered build configuration for web, pwa and shell targets",
    long_about = "tack merges built-in defaults, environment overlays, target overlays and\n\
                  explicit overrides into one configuration per build target, validates it,\n\
                  and prints what each backend needs as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every overlay as it is applied.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
