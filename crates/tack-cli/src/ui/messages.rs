//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Style};

use super::paint;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".style(paint(Style::new().green().bold())), message);
}

/// Print an informational message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".style(paint(Style::new().blue().bold())), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    let style = paint(Style::new().yellow());
    eprintln!("{} {}", "⚠".style(style.bold()), message.style(style));
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    let style = paint(Style::new().red());
    eprintln!("{} {}", "✗".style(style.bold()), message.style(style));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
