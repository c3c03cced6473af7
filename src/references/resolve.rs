use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Percent-decode a reference target, replacing invalid UTF-8 sequences.
///
/// Malformed escapes such as `%zz` are left untouched.
pub fn decode_target(target: &str) -> String {
    percent_decode_str(target).decode_utf8_lossy().into_owned()
}

/// Lexically normalise a path: `.` segments are dropped and `..` folds into its parent.
///
/// Symlinks are not resolved, and `..` never climbs above the root of an absolute path.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if at_root && normalized.has_root() {
                    continue;
                }
                if at_root || normalized.ends_with("..") {
                    normalized.push("..");
                } else {
                    normalized.pop();
                }
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }

    normalized
}

/// Resolve a raw reference target against the directory of the document that contains it.
pub fn resolve_reference(document_dir: &Path, target: &str) -> PathBuf {
    normalize_path(&document_dir.join(decode_target(target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(decode_target("Pasted%20image.png"), "Pasted image.png");
        assert_eq!(decode_target("caf%C3%A9.png"), "café.png");
    }

    #[test]
    fn leaves_malformed_escapes_alone() {
        assert_eq!(decode_target("100%zz.png"), "100%zz.png");
    }

    #[test]
    fn folds_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/notes/a/./b/../assets/x.png")),
            PathBuf::from("/notes/a/assets/x.png")
        );
    }

    #[test]
    fn never_climbs_above_root() {
        assert_eq!(
            normalize_path(Path::new("/notes/../../x.png")),
            PathBuf::from("/x.png")
        );
    }

    #[test]
    fn keeps_leading_parents_on_relative_paths() {
        assert_eq!(
            normalize_path(Path::new("../../a/../b.png")),
            PathBuf::from("../../b.png")
        );
    }

    #[test]
    fn resolves_relative_to_document_directory() {
        let resolved = resolve_reference(Path::new("/notes/day"), "../assets/Pasted%20image.png");
        assert_eq!(resolved, PathBuf::from("/notes/assets/Pasted image.png"));
    }

    #[test]
    fn absolute_targets_replace_the_document_directory() {
        let resolved = resolve_reference(Path::new("/notes/day"), "/shared/assets/a.png");
        assert_eq!(resolved, PathBuf::from("/shared/assets/a.png"));
    }
}
