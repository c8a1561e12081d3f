//! Find/replace and target path resolution

use std::path::{Component, Path, PathBuf};

/// Replace every literal occurrence of `find` in `content` with `replace`.
///
/// Plain substring substitution: no patterns, no occurrence limit.
pub fn find_replace(content: &str, find: &str, replace: &str) -> String {
    content.replace(find, replace)
}

/// Resolve a document path inside a working copy.
///
/// The path is read as if relative to the filesystem root and normalised
/// lexically, so `..` never climbs out of `workdir`.
pub fn resolve_target_path(workdir: &Path, file_path: &str) -> PathBuf {
    let mut relative = PathBuf::new();

    for component in Path::new(file_path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                relative.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }

    workdir.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        assert_eq!(
            find_replace("let a = foo(); foo(a); // foo", "foo", "bar"),
            "let a = bar(); bar(a); // bar"
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let content = "fn main() {\n    println!(\"hi\");\n}\n";
        assert_eq!(find_replace(content, "missing", "x"), content);
    }

    #[test]
    fn test_find_text_gone_after_replace() {
        let updated = find_replace("aXbXc", "X", "-");
        assert!(!updated.contains('X'));
    }

    #[test]
    fn test_replacement_containing_find_text() {
        // The replacement is inserted verbatim, not rescanned.
        let updated = find_replace("a.b", ".", "..");
        assert_eq!(updated, "a..b");
        assert!(updated.contains('.'));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(find_replace("x(\\d+)y 12", "(\\d+)", "N"), "xNy 12");
    }

    #[test]
    fn test_empty_find_text_inserts_between_chars() {
        assert_eq!(find_replace("ab", "", "-"), "-a-b-");
    }

    #[test]
    fn test_absolute_path_lands_under_workdir() {
        let workdir = Path::new("/tmp/work");
        assert_eq!(
            resolve_target_path(workdir, "/src/app.py"),
            PathBuf::from("/tmp/work/src/app.py")
        );
    }

    #[test]
    fn test_relative_path_lands_under_workdir() {
        let workdir = Path::new("/tmp/work");
        assert_eq!(
            resolve_target_path(workdir, "src/./lib.rs"),
            PathBuf::from("/tmp/work/src/lib.rs")
        );
    }

    #[test]
    fn test_parent_dirs_do_not_escape() {
        let workdir = Path::new("/tmp/work");
        assert_eq!(
            resolve_target_path(workdir, "/../../etc/passwd"),
            PathBuf::from("/tmp/work/etc/passwd")
        );
        assert_eq!(
            resolve_target_path(workdir, "/src/../README.md"),
            PathBuf::from("/tmp/work/README.md")
        );
    }
}
