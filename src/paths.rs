//! Path-mapping collaborators shared by the results writer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::HarnessError;

// =====================
// Test-root mapping
// =====================

/// Maps absolute test-source paths to paths relative to the suite root.
///
/// The results tree mirrors the test-source tree, so every output path is
/// derived by re-rooting the relative portion of a test path.
#[derive(Debug, Clone)]
pub struct TestRoot {
    root: PathBuf,
}

impl TestRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the portion of `test_file` below the suite root.
    ///
    /// A path outside the root cannot be mirrored into the results tree and
    /// is reported as [`HarnessError::OutsideTestRoot`].
    pub fn relative_test_path(&self, test_file: &Path) -> Result<PathBuf, HarnessError> {
        test_file
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| HarnessError::OutsideTestRoot {
                path: test_file.to_path_buf(),
                root: self.root.clone(),
            })
    }
}

// =====================
// Filename and directory utilities
// =====================

/// Replaces the final extension of `path` with `modifier`.
///
/// The modifier usually carries the replacement extension itself, e.g.
/// `-expected.txt`. A path without an extension simply gets the modifier
/// appended. Pure string manipulation; never touches the filesystem.
pub fn replace_extension(path: &Path, modifier: &str) -> PathBuf {
    let mut stripped = path.with_extension("").into_os_string();
    stripped.push(modifier);
    PathBuf::from(stripped)
}

/// Creates `dir` and any missing parents.
///
/// A directory that already exists is not an error, so concurrent callers
/// racing on the same path are safe.
pub fn ensure_dir(dir: &Path) -> Result<(), HarnessError> {
    fs::create_dir_all(dir).map_err(|source| HarnessError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_extension_swaps_final_extension() {
        assert_eq!(
            replace_extension(Path::new("fast/dom/foo.html"), "-expected.txt"),
            PathBuf::from("fast/dom/foo-expected.txt")
        );
    }

    #[test]
    fn replace_extension_only_strips_last_extension() {
        assert_eq!(
            replace_extension(Path::new("a/b.tar.gz"), ".txt"),
            PathBuf::from("a/b.tar.txt")
        );
    }

    #[test]
    fn replace_extension_handles_missing_extension() {
        assert_eq!(
            replace_extension(Path::new("a/noext"), "-diff.txt"),
            PathBuf::from("a/noext-diff.txt")
        );
    }

    #[test]
    fn relative_test_path_strips_root() {
        let root = TestRoot::new("/suite/tests");
        let rel = root
            .relative_test_path(Path::new("/suite/tests/fast/dom/foo.html"))
            .unwrap();
        assert_eq!(rel, PathBuf::from("fast/dom/foo.html"));
    }

    #[test]
    fn relative_test_path_rejects_outsiders() {
        let root = TestRoot::new("/suite/tests");
        let err = root
            .relative_test_path(Path::new("/elsewhere/foo.html"))
            .unwrap_err();
        assert!(matches!(err, HarnessError::OutsideTestRoot { .. }));
    }
}
