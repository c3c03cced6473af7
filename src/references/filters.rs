/// Image extensions recognised in reference targets, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg", "bmp", "gif"];

/// Determine whether a reference target points at a remote resource.
///
/// Anything starting with `http` (in any letter case) is treated as remote and never
/// resolved against the filesystem.
pub fn is_remote_reference(target: &str) -> bool {
    target
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"))
}

/// Regex alternation for [`IMAGE_EXTENSIONS`], e.g. `jpg|png|…`.
pub(super) fn extension_alternation() -> String {
    IMAGE_EXTENSIONS.join("|")
}

#[cfg(test)]
mod tests {
    use super::{extension_alternation, is_remote_reference};

    #[test]
    fn flags_http_targets_in_any_case() {
        assert!(is_remote_reference("https://example.com/a.png"));
        assert!(is_remote_reference("HTTP://example.com/a.png"));
        assert!(is_remote_reference("httpish.png"));
    }

    #[test]
    fn keeps_relative_and_short_targets() {
        assert!(!is_remote_reference("assets/photo.png"));
        assert!(!is_remote_reference("a.p"));
        assert!(!is_remote_reference("ünï.png"));
    }

    #[test]
    fn joins_extensions_for_patterns() {
        assert_eq!(extension_alternation(), "jpg|png|jpeg|bmp|gif");
    }
}
