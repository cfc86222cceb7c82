//! Writes one test's comparison artifacts into the results directory.
//!
//! The results tree mirrors the test-source tree. Each comparison type can
//! contribute up to four files per test: the actual output, the expected
//! output, a unified line diff, and a word-level HTML diff.

use std::fs;
use std::path::{Path, PathBuf};
use std::str;

use crate::diff::unified_diff;
use crate::errors::HarnessError;
use crate::paths::{ensure_dir, replace_extension, TestRoot};
use crate::wdiff::WordDiffRunner;

// Filename pieces used when writing failures to the results directory.
pub const FILENAME_SUFFIX_ACTUAL: &str = "-actual-win";
pub const FILENAME_SUFFIX_EXPECTED: &str = "-expected";
pub const FILENAME_SUFFIX_DIFF: &str = "-diff-win";
pub const FILENAME_SUFFIX_WDIFF: &str = "-wdiff-win.html";

/// Every artifact produced by one [`ResultWriter::write_output_files`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub actual: PathBuf,
    pub expected: PathBuf,
    pub diff: Option<PathBuf>,
    pub word_diff: Option<PathBuf>,
}

/// Persists comparison artifacts for individual tests.
///
/// Constructed once per run and immutable afterwards: it holds the platform
/// identifier (e.g. "chromium-win"), the root of the results directory, and
/// the test-root mapping used to mirror source paths into it. All I/O is
/// synchronous and blocking. The writer takes no locks; the hosting runner
/// partitions work so no two concurrent calls target the same output file.
pub struct ResultWriter {
    platform: String,
    root_output_dir: PathBuf,
    test_root: TestRoot,
}

impl ResultWriter {
    pub fn new(
        platform: impl Into<String>,
        root_output_dir: impl Into<PathBuf>,
        test_root: TestRoot,
    ) -> Self {
        Self {
            platform: platform.into(),
            root_output_dir: root_output_dir.into(),
            test_root,
        }
    }

    /// Platform identifier selecting platform-specific baselines.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn root_output_dir(&self) -> &Path {
        &self.root_output_dir
    }

    // =====================
    // Path resolution
    // =====================

    /// Absolute path under the results root for `test_file`, with the test's
    /// extension replaced by `modifier`.
    ///
    /// For `<root>/fast/dom/foo.html` and modifier `-expected.txt` this is
    /// `<output>/fast/dom/foo-expected.txt`.
    pub fn output_path(&self, test_file: &Path, modifier: &str) -> Result<PathBuf, HarnessError> {
        let relative = self.test_root.relative_test_path(test_file)?;
        Ok(replace_extension(
            &self.root_output_dir.join(relative),
            modifier,
        ))
    }

    /// Pure form of [`Self::output_path`] for already-relative test paths:
    /// strips the extension and appends `modifier`. Never touches the
    /// filesystem.
    pub fn relative_output_path(relative_file: &Path, modifier: &str) -> PathBuf {
        replace_extension(relative_file, modifier)
    }

    /// Creates the results directory for `test_file` if needed.
    ///
    /// Idempotent: an existing directory is not an error, so concurrent
    /// callers mapping into the same directory are safe.
    pub fn make_output_directory(&self, test_file: &Path) -> Result<(), HarnessError> {
        let output = self.output_path(test_file, "")?;
        if let Some(dir) = output.parent() {
            ensure_dir(dir)?;
        }
        Ok(())
    }

    // =====================
    // Baseline persistence
    // =====================

    /// Records `data` as a new baseline under `dest_dir`.
    ///
    /// The file is named `<test>-expected<modifier>`, suitable for use as
    /// the expected results of a later run, and overwrites any previous
    /// baseline unconditionally. Returns the path written so callers
    /// honoring `show_sources` can report it.
    pub fn save_baseline(
        &self,
        test_file: &Path,
        dest_dir: &Path,
        data: &[u8],
        modifier: &str,
    ) -> Result<PathBuf, HarnessError> {
        let relative = self.test_root.relative_test_path(test_file)?;
        let target = replace_extension(
            &dest_dir.join(relative),
            &format!("{}{}", FILENAME_SUFFIX_EXPECTED, modifier),
        );
        if let Some(dir) = target.parent() {
            ensure_dir(dir)?;
        }
        write_bytes(&target, data)?;
        Ok(target)
    }

    // =====================
    // Output files
    // =====================

    /// Writes the actual output, the expected output, and optionally diffs
    /// between the two for one comparison type.
    ///
    /// `test_tag` names the comparison (e.g. "simp") and `file_suffix` the
    /// artifact extension (e.g. ".txt"); with those values the actual
    /// artifact for `my_test.html` is `my_test-simp-actual-win.txt`. Both
    /// content files are written as raw bytes and overwritten
    /// unconditionally.
    ///
    /// `write_diff` should be false for results that are not text; the diff
    /// artifacts require UTF-8 content. When `word_diff` is supplied, the
    /// external wdiff tool is run over the two files just written and its
    /// failure is reported as an error, never mistaken for an empty diff.
    pub fn write_output_files(
        &self,
        test_file: &Path,
        test_tag: &str,
        file_suffix: &str,
        actual: &[u8],
        expected: &[u8],
        write_diff: bool,
        word_diff: Option<&WordDiffRunner>,
    ) -> Result<WrittenFiles, HarnessError> {
        self.make_output_directory(test_file)?;

        let actual_path = self.output_path(
            test_file,
            &format!("-{}{}{}", test_tag, FILENAME_SUFFIX_ACTUAL, file_suffix),
        )?;
        let expected_path = self.output_path(
            test_file,
            &format!("-{}{}{}", test_tag, FILENAME_SUFFIX_EXPECTED, file_suffix),
        )?;
        write_bytes(&actual_path, actual)?;
        write_bytes(&expected_path, expected)?;

        let mut written = WrittenFiles {
            actual: actual_path.clone(),
            expected: expected_path.clone(),
            diff: None,
            word_diff: None,
        };

        if write_diff {
            let expected_text = as_text(expected, "expected output")?;
            let actual_text = as_text(actual, "actual output")?;
            let diff = unified_diff(
                expected_text,
                actual_text,
                &expected_path.display().to_string(),
                &actual_path.display().to_string(),
            );
            let diff_path = self.output_path(
                test_file,
                &format!("-{}{}{}", test_tag, FILENAME_SUFFIX_DIFF, file_suffix),
            )?;
            write_bytes(&diff_path, diff.as_bytes())?;
            written.diff = Some(diff_path);
        }

        if let Some(runner) = word_diff {
            let html = runner.render(&actual_path, &expected_path)?;
            let wdiff_path = self.output_path(
                test_file,
                &format!("-{}{}", test_tag, FILENAME_SUFFIX_WDIFF),
            )?;
            write_bytes(&wdiff_path, html.as_bytes())?;
            written.word_diff = Some(wdiff_path);
        }

        Ok(written)
    }
}

fn write_bytes(path: &Path, data: &[u8]) -> Result<(), HarnessError> {
    fs::write(path, data).map_err(|source| HarnessError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn as_text<'a>(bytes: &'a [u8], what: &'static str) -> Result<&'a str, HarnessError> {
    str::from_utf8(bytes).map_err(|_| HarnessError::InvalidUtf8 { what })
}
