//! Abstract comparison contract implemented by concrete test types.

use std::path::Path;

use crate::args::TestArguments;
use crate::errors::HarnessError;
use crate::failure::TestFailure;

/// The slice of a running test-shell process that a comparison may inspect.
///
/// The runner implements this over its real child-process handle; tests use
/// lightweight stubs. Comparisons only ever read from it.
pub trait ProcessHandle {
    /// Exit status of the process, if it has already exited.
    fn exit_status(&self) -> Option<i32>;

    /// True if the process terminated abnormally (signal, abort, ...).
    fn crashed(&self) -> bool;
}

/// Compares the output of one test run against its expected baseline.
///
/// Each concrete test type (text dumps, render trees, pixel tests, ...)
/// implements this once; the runner invokes it per test. Returning a
/// non-empty list is the normal "test failed" path and must not be reported
/// through `Err` — the error channel is reserved for structural problems
/// such as unwritable result files.
pub trait Comparator {
    /// Compares `output` (the raw bytes the test shell produced for
    /// `test_file`) against the expected baseline, persisting whatever
    /// artifacts the test type calls for along the way.
    ///
    /// An empty list means the test passed.
    fn compare_output(
        &self,
        test_file: &Path,
        proc: &dyn ProcessHandle,
        output: &[u8],
        args: &TestArguments,
    ) -> Result<Vec<TestFailure>, HarnessError>;
}
