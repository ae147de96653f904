use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{TargetSelection, parse_assignment, parse_target_selection};

/// Available tack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and print the configuration for one or all targets
    ///
    /// Prints the projected target configuration as JSON on stdout. Issues
    /// go to stderr; the exit status is non-zero if any of them is an error.
    Resolve(ResolveArgs),

    /// Validate the configuration without printing it
    Check(CheckArgs),

    /// Show which overlays assigned a key, in application order
    Explain(ExplainArgs),

    /// List build targets and the keys each one requires
    Targets(TargetsArgs),
}

/// Inputs shared by every command that resolves a configuration
#[derive(Args, Debug, Clone)]
pub struct ResolveOptions {
    /// Build target: web, pwa, desktop-shell, mobile-shell, or all
    ///
    /// Defaults to the most specific target detected from the project
    /// layout (src-pwa/, src-electron/, src-cordova/).
    #[arg(short, long, value_parser = parse_target_selection, value_name = "TARGET")]
    pub target: Option<TargetSelection>,

    /// Project root containing tack.toml or package.json
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Environment name, overriding APP_ENV
    #[arg(short, long, value_name = "NAME")]
    pub env: Option<String>,

    /// API base URL, overriding APP_API
    #[arg(long, value_name = "URL")]
    pub api: Option<String>,

    /// Public asset path, overriding APP_PUBLIC_PATH
    #[arg(long, value_name = "PATH")]
    pub public_path: Option<String>,

    /// Override a key, merging collections (repeatable)
    ///
    /// Values are parsed as JSON when valid, otherwise taken as strings:
    ///   --set devServer.port=9000
    ///   --set 'framework.plugins=["Meta"]'
    #[arg(long, value_parser = parse_assignment, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Override a key, replacing collections (repeatable)
    #[arg(long, value_parser = parse_assignment, value_name = "KEY=VALUE")]
    pub replace: Vec<String>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub options: ResolveOptions,

    /// Print the full effective configuration (with assignment trace)
    /// instead of the projected target configuration
    #[arg(long)]
    pub effective: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub options: ResolveOptions,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the explain command
#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub options: ResolveOptions,

    /// Dotted configuration key, e.g. build.vueRouterMode
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Arguments for the targets command
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Project root used to detect supported targets
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}
