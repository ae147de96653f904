//! Terminal output: status lines and issue reports on stderr.
//!
//! Machine-readable results always go to stdout; everything here writes to
//! stderr so output can be piped.

mod messages;
mod report;

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::Style;

pub use messages::{error, info, success, warning};
pub use report::{print_issue, print_issues, print_projection_error};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status output is colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// `style` when colors are on, a plain style otherwise.
pub(crate) fn paint(style: Style) -> Style {
    if colors_enabled() { style } else { Style::new() }
}
