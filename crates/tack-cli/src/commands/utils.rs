//! Shared setup for commands that resolve a configuration.

use tack_config::{
    ConfigDiscovery, EnvironmentContext, FlagOverride, Resolver, Target, defaults, env,
    parse_flags,
};
use tack_target::detect_target;

use crate::cli::{ResolveOptions, TargetSelection};
use crate::error::{CliError, Result};

/// Everything a resolution needs, built once per invocation.
pub(crate) struct Session {
    pub resolver: Resolver,
    pub context: EnvironmentContext,
    pub flags: Vec<FlagOverride>,
    pub targets: Vec<Target>,
}

impl Session {
    pub fn new(options: &ResolveOptions) -> Result<Self> {
        if !options.project.is_dir() {
            return Err(CliError::FileNotFound(options.project.clone()));
        }

        let overlays = ConfigDiscovery::new(&options.project).overlay_set()?;
        let resolver = Resolver::with_overlays(defaults(), overlays);

        let flags = parse_flags(
            options.set.iter().map(String::as_str),
            options.replace.iter().map(String::as_str),
        )?;

        let selection = options
            .target
            .unwrap_or_else(|| TargetSelection::One(detect_target(&options.project)));

        Ok(Self {
            resolver,
            context: context_for(options),
            flags,
            targets: selection.targets(),
        })
    }

    /// The single selected target, or an error when `all` was given.
    pub fn single_target(&self, command: &str) -> Result<Target> {
        match self.targets.as_slice() {
            [target] => Ok(*target),
            _ => Err(CliError::InvalidArgument(format!(
                "'{command}' works on one target at a time; pass --target <name>"
            ))),
        }
    }
}

/// Snapshot the process environment, then apply command-line values.
pub(crate) fn context_for(options: &ResolveOptions) -> EnvironmentContext {
    let mut context = EnvironmentContext::read();
    if let Some(name) = &options.env {
        context = context.with(env::APP_ENV, name.as_str());
    }
    if let Some(api) = &options.api {
        context = context.with(env::APP_API, api.as_str());
    }
    if let Some(path) = &options.public_path {
        context = context.with(env::APP_PUBLIC_PATH, path.as_str());
    }
    context
}
