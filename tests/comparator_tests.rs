//! Exercises the comparison contract end to end with a minimal text test
//! type of the kind a hosting runner implements.

use std::path::Path;

use tempfile::TempDir;
use touchstone::paths::TestRoot;
use touchstone::writer::ResultWriter;
use touchstone::{Comparator, HarnessError, ProcessHandle, TestArguments, TestFailure};

struct StubProcess {
    exit: Option<i32>,
    crashed: bool,
}

impl ProcessHandle for StubProcess {
    fn exit_status(&self) -> Option<i32> {
        self.exit
    }

    fn crashed(&self) -> bool {
        self.crashed
    }
}

fn healthy() -> StubProcess {
    StubProcess {
        exit: Some(0),
        crashed: false,
    }
}

/// Minimal text test type: compares the dumped text against the baseline
/// and persists artifacts on mismatch.
struct TextComparator {
    writer: ResultWriter,
    baseline: Vec<u8>,
}

impl Comparator for TextComparator {
    fn compare_output(
        &self,
        test_file: &Path,
        proc: &dyn ProcessHandle,
        output: &[u8],
        args: &TestArguments,
    ) -> Result<Vec<TestFailure>, HarnessError> {
        let mut failures = Vec::new();
        if proc.crashed() {
            failures.push(TestFailure::Crash);
        }
        if output != self.baseline.as_slice() {
            failures.push(TestFailure::TextMismatch);
            self.writer.write_output_files(
                test_file,
                "simp",
                ".txt",
                output,
                &self.baseline,
                true,
                None,
            )?;
            if let (Some(dir), true) = (args.new_baseline.as_deref(), args.text_baseline) {
                self.writer.save_baseline(test_file, dir, output, ".txt")?;
            }
        }
        Ok(failures)
    }
}

fn comparator_for(src: &TempDir, out: &TempDir, baseline: &[u8]) -> TextComparator {
    TextComparator {
        writer: ResultWriter::new("chromium-win", out.path(), TestRoot::new(src.path())),
        baseline: baseline.to_vec(),
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn matching_output_passes_with_no_artifacts() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let comparator = comparator_for(&src, &out, b"hello\n");
        let test_file = src.path().join("greet.html");

        let failures = comparator
            .compare_output(&test_file, &healthy(), b"hello\n", &TestArguments::default())
            .unwrap();

        assert!(failures.is_empty());
        assert!(!out.path().join("greet-simp-actual-win.txt").exists());
    }

    #[test]
    fn mismatched_output_fails_and_writes_artifacts() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let comparator = comparator_for(&src, &out, b"hello\n");
        let test_file = src.path().join("greet.html");

        let failures = comparator
            .compare_output(&test_file, &healthy(), b"goodbye\n", &TestArguments::default())
            .unwrap();

        assert_eq!(failures, vec![TestFailure::TextMismatch]);
        assert!(out.path().join("greet-simp-actual-win.txt").exists());
        assert!(out.path().join("greet-simp-expected.txt").exists());
        assert!(out.path().join("greet-simp-diff-win.txt").exists());
    }

    #[test]
    fn crash_is_reported_ahead_of_the_mismatch() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let comparator = comparator_for(&src, &out, b"hello\n");
        let test_file = src.path().join("crashy.html");
        let proc = StubProcess {
            exit: None,
            crashed: true,
        };

        let failures = comparator
            .compare_output(&test_file, &proc, b"", &TestArguments::default())
            .unwrap();

        assert_eq!(failures, vec![TestFailure::Crash, TestFailure::TextMismatch]);
    }

    #[test]
    fn rebaselining_records_the_new_text_baseline() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let baselines = TempDir::new().unwrap();
        let comparator = comparator_for(&src, &out, b"old\n");
        let test_file = src.path().join("moved.html");

        let args = TestArguments {
            new_baseline: Some(baselines.path().to_path_buf()),
            text_baseline: true,
            ..TestArguments::default()
        };
        comparator
            .compare_output(&test_file, &healthy(), b"new\n", &args)
            .unwrap();

        let recorded = baselines.path().join("moved-expected.txt");
        assert_eq!(std::fs::read(&recorded).unwrap(), b"new\n");
    }
}
