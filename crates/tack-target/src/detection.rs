//! Auto-detection of build targets from the project layout.

use std::path::Path;

use tack_config::Target;

/// Source directories that mark a project as supporting a target, in
/// declaration order.
const MARKERS: [(&str, Target); 3] = [
    ("src-pwa", Target::Pwa),
    ("src-electron", Target::DesktopShell),
    ("src-cordova", Target::MobileShell),
];

/// Detect the build targets a project supports
///
/// `web` is always supported; the others are detected from their source
/// directories:
/// - `src-pwa/` → pwa
/// - `src-electron/` → desktop-shell
/// - `src-cordova/` → mobile-shell
pub fn detect_targets(project_root: &Path) -> Vec<Target> {
    let mut targets = vec![Target::Web];
    targets.extend(
        MARKERS
            .iter()
            .filter(|(dir, _)| project_root.join(dir).is_dir())
            .map(|&(_, target)| target),
    );
    targets
}

/// The single most specific target for a project, `web` when nothing else
/// is detected.
pub fn detect_target(project_root: &Path) -> Target {
    detect_targets(project_root)
        .last()
        .copied()
        .unwrap_or(Target::Web)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_project_is_web() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_targets(dir.path()), vec![Target::Web]);
        assert_eq!(detect_target(dir.path()), Target::Web);
    }

    #[test]
    fn source_directories_add_targets() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src-cordova")).unwrap();
        fs::create_dir(dir.path().join("src-pwa")).unwrap();

        assert_eq!(
            detect_targets(dir.path()),
            vec![Target::Web, Target::Pwa, Target::MobileShell]
        );
        assert_eq!(detect_target(dir.path()), Target::MobileShell);
    }

    #[test]
    fn marker_files_are_not_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("src-electron"), "").unwrap();
        assert_eq!(detect_targets(dir.path()), vec![Target::Web]);
    }
}
