//! Touchstone Error Handling
//!
//! One error type for everything the writer and its collaborators can fail
//! at: filesystem trouble, paths outside the suite root, word-diff subprocess
//! trouble, and content that is not valid UTF-8. A failed *test* is never an
//! error; comparison failures travel as [`crate::failure::TestFailure`]
//! values instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the comparison/persistence layer.
///
/// These describe infrastructure problems attributable to a single test. The
/// runner decides whether to mark that test as errored; nothing here should
/// abort a whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Creating a results directory failed.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a result artifact failed.
    #[error("failed to write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A test path could not be mapped because it is not under the suite root.
    #[error("test file {} is not under the test root {}", path.display(), root.display())]
    OutsideTestRoot { path: PathBuf, root: PathBuf },

    /// The word-diff executable could not be started at all.
    #[error("failed to launch word-diff tool {}", program.display())]
    WordDiffLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on the word-diff subprocess failed.
    #[error("failed waiting on word-diff tool {}", program.display())]
    WordDiffWait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The word-diff subprocess exited abnormally. Exit code 1 is *not* an
    /// error (wdiff uses it to report that differences were found); `None`
    /// means the process died to a signal.
    #[error("word-diff tool {} exited abnormally (code {:?})", program.display(), code)]
    WordDiffFailed { program: PathBuf, code: Option<i32> },

    /// The word-diff subprocess ran past its deadline and was killed.
    #[error("word-diff tool {} did not finish within {}s", program.display(), secs)]
    WordDiffTimeout { program: PathBuf, secs: u64 },

    /// Content that must be text (for line diffing or HTML escaping) was not
    /// valid UTF-8.
    #[error("{what} is not valid UTF-8")]
    InvalidUtf8 { what: &'static str },
}
