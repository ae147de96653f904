//! Command implementations for the tack CLI.
//!
//! - [`resolve`] - Print projected configuration as JSON
//! - [`check`] - Validate only
//! - [`explain`] - Print the assignment trace for a key
//! - [`targets`] - List build targets
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod explain;
pub mod resolve;
pub mod targets;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use explain::execute as explain_execute;
pub use resolve::execute as resolve_execute;
pub use targets::execute as targets_execute;
