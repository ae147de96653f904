//! Value parsers for command-line arguments.

use tack_config::Target;

/// `--target` value: one target or every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelection {
    One(Target),
    All,
}

impl TargetSelection {
    pub fn targets(self) -> Vec<Target> {
        match self {
            TargetSelection::One(target) => vec![target],
            TargetSelection::All => Target::ALL.to_vec(),
        }
    }
}

/// Parse a `--target` value.
///
/// Accepts the target names, their aliases (`spa`, `electron`, `cordova`,
/// ...) and `all`.
pub fn parse_target_selection(s: &str) -> Result<TargetSelection, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(TargetSelection::All);
    }
    s.parse::<Target>()
        .map(TargetSelection::One)
        .map_err(|e| format!("{e} (expected web, pwa, desktop-shell, mobile-shell or all)"))
}

/// Check that an override has the `KEY=VALUE` shape.
///
/// The key and value themselves are validated when the override is parsed.
pub fn parse_assignment(s: &str) -> Result<String, String> {
    match s.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => Ok(s.to_string()),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        assert_eq!(parse_target_selection("all"), Ok(TargetSelection::All));
        assert_eq!(
            parse_target_selection("electron"),
            Ok(TargetSelection::One(Target::DesktopShell))
        );
        assert!(parse_target_selection("ssr").is_err());
        assert_eq!(TargetSelection::All.targets().len(), 4);
    }

    #[test]
    fn test_assignment_shape() {
        assert!(parse_assignment("devServer.port=9000").is_ok());
        assert!(parse_assignment("build.env.APP_API=").is_ok());
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("devServer.port").is_err());
    }
}
