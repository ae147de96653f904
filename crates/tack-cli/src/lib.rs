//! tack CLI - layered build configuration for web, pwa and shell targets.
//!
//! This crate wires `tack-config` (resolution and validation) and
//! `tack-target` (projection) to the command line.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per subcommand
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status lines and issue listings
//!
//! # Example
//!
//! ```rust
//! use tack_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, true, true);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
