//! Turning a requested path into a displayable directory.

use std::path::{Path, PathBuf};

/// Resolves `path` to the directory that should be displayed.
///
/// A directory resolves to itself. Anything else resolves to its nearest
/// ancestor that is a directory, and the rejected leaf name is returned so
/// the consumer can preselect it once the listing loads. If no ancestor is
/// a directory the path is returned unchanged and the scan reports the
/// failure.
pub fn resolve_directory(path: &Path) -> (PathBuf, Option<String>) {
    if path.is_dir() {
        return (path.to_path_buf(), None);
    }
    let leaf = path.file_name().map(|n| n.to_string_lossy().into_owned());

    let mut candidate = path.parent();
    while let Some(dir) = candidate {
        if dir.is_dir() {
            return (dir.to_path_buf(), leaf);
        }
        candidate = dir.parent();
    }
    (path.to_path_buf(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn directory_resolves_to_itself() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_directory(tmp.path()), (tmp.path().to_path_buf(), None));
    }

    #[test]
    fn file_resolves_to_parent_with_preselection() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("file.txt"), "").unwrap();

        let (resolved, preselected) = resolve_directory(&dir.join("file.txt"));

        assert_eq!(resolved, dir);
        assert_eq!(preselected.as_deref(), Some("file.txt"));
    }

    #[test]
    fn missing_path_walks_up_to_existing_ancestor() {
        let tmp = TempDir::new().unwrap();
        let (resolved, preselected) = resolve_directory(&tmp.path().join("x").join("y").join("z.txt"));

        assert_eq!(resolved, tmp.path());
        assert_eq!(preselected.as_deref(), Some("z.txt"));
    }
}
