//! Directory enumeration.
//!
//! Traversal is sorted by file name so repeated runs over an unchanged
//! tree return hits in the same order. Ignored names are pruned wherever
//! they appear in the tree, file or directory, which covers
//! version-control metadata, dependency caches, virtual environments,
//! and build output.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Names excluded from traversal at any depth.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "node_modules",
    "__pycache__",
    ".local",
    "target",
];

/// Default cap on the number of files enumerated per traversal.
pub const DEFAULT_MAX_FILES: usize = 5000;

/// Whether an entry carries an ignored name, directory or not; the
/// traversal root itself (depth 0) is never pruned.
fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Enumerate up to `max_files` regular files under `root`.
///
/// Traversal errors (permission denied, dangling symlinks) are skipped,
/// not surfaced. The returned order is deterministic for an unchanged
/// tree.
pub fn iter_files(root: &Path, max_files: usize) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .take(max_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn skips_ignored_directories_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("keep.txt"));
        touch(&dir.path().join(".git").join("config"));
        touch(&dir.path().join("sub").join("node_modules").join("x.js"));
        touch(&dir.path().join("sub").join("keep2.txt"));

        let files: Vec<_> = iter_files(dir.path(), 100).collect();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| !p.to_string_lossy().contains(".git")));
        assert!(
            files
                .iter()
                .all(|p| !p.to_string_lossy().contains("node_modules"))
        );
    }

    #[test]
    fn skips_regular_files_with_ignored_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("keep.txt"));
        touch(&dir.path().join("target"));
        touch(&dir.path().join("sub").join(".git"));

        let files: Vec<_> = iter_files(dir.path(), 100).collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.txt"));
    }

    #[test]
    fn root_with_ignored_name_is_still_walked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("target");
        touch(&root.join("inside.txt"));

        let files: Vec<_> = iter_files(&root, 100).collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn caps_at_max_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..10 {
            touch(&dir.path().join(format!("f{i}.txt")));
        }
        assert_eq!(iter_files(dir.path(), 3).count(), 3);
    }

    #[test]
    fn order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.txt"] {
            touch(&dir.path().join(name));
        }
        let first: Vec<_> = iter_files(dir.path(), 100).collect();
        let second: Vec<_> = iter_files(dir.path(), 100).collect();
        assert_eq!(first, second);
    }
}
