//! Public asset path rules.

/// Collapse repeated separators and drop a trailing one.
///
/// A bare `/` is kept as is; an empty path stays empty. The `//` after a URL
/// scheme and the leading `//` of a protocol-relative URL are left alone.
pub fn normalize_public_path(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let (prefix, rest) = match raw.find("://") {
        Some(at) => raw.split_at(at + 3),
        None if is_protocol_relative(raw) => raw.split_at(2),
        None => ("", raw),
    };

    let mut normalized = String::with_capacity(raw.len());
    normalized.push_str(prefix);
    for ch in rest.chars() {
        if ch == '/' && normalized.len() > prefix.len() && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.len() > prefix.len() + 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// `//host/...`: exactly two slashes followed by a host.
fn is_protocol_relative(raw: &str) -> bool {
    raw.strip_prefix("//")
        .is_some_and(|host| !host.is_empty() && !host.starts_with('/'))
}

/// Manifest `start_url` for a normalized public path.
pub fn start_url(public_path: &str) -> String {
    match public_path {
        "" => ".".to_string(),
        "/" => "/".to_string(),
        path => format!("{path}/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_is_removed() {
        assert_eq!(normalize_public_path("/ui/"), "/ui");
        assert_eq!(normalize_public_path("/ui"), "/ui");
        assert_eq!(
            normalize_public_path("https://cdn.example.com//app/"),
            "https://cdn.example.com/app"
        );
    }

    #[test]
    fn repeated_separators_collapse() {
        assert_eq!(normalize_public_path("/ui///admin//"), "/ui/admin");
        assert_eq!(normalize_public_path("///ui"), "/ui");
        assert_eq!(normalize_public_path("///"), "/");
    }

    #[test]
    fn protocol_relative_host_is_kept() {
        assert_eq!(
            normalize_public_path("//cdn.example.com/app/"),
            "//cdn.example.com/app"
        );
        assert_eq!(
            normalize_public_path("//cdn.example.com//app//"),
            "//cdn.example.com/app"
        );
        assert_eq!(start_url("//cdn.example.com/app"), "//cdn.example.com/app/");
    }

    #[test]
    fn root_and_empty_are_kept() {
        assert_eq!(normalize_public_path("/"), "/");
        assert_eq!(normalize_public_path("//"), "/");
        assert_eq!(normalize_public_path(""), "");
        assert_eq!(normalize_public_path("  "), "");
    }

    #[test]
    fn start_url_follows_public_path() {
        assert_eq!(start_url("/ui"), "/ui/");
        assert_eq!(start_url("/"), "/");
        assert_eq!(start_url(""), ".");
    }
}
