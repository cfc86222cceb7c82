//! Failure descriptors produced by output comparison.

use std::fmt;

/// Why a single test's output did not match its baseline.
///
/// A comparison returns an ordered list of these; an empty list means the
/// test passed. These are ordinary values, not errors: a failing test is the
/// expected business of a test harness, and only infrastructure problems go
/// through [`crate::errors::HarnessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestFailure {
    /// The test shell did not finish within the allotted time.
    Timeout,
    /// The test shell crashed while running the test.
    Crash,
    /// No expected output file exists for this test.
    MissingResult,
    /// Text output did not match the expected text.
    TextMismatch,
    /// The pixel test produced no image dump.
    MissingImage,
    /// The pixel test produced no image checksum.
    MissingImageHash,
    /// The image dump differs from the expected image.
    ImageMismatch,
    /// The image checksum differs from the expected checksum.
    ImageHashMismatch,
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            TestFailure::Timeout => "Test timed out",
            TestFailure::Crash => "Test shell crashed",
            TestFailure::MissingResult => "No expected results found",
            TestFailure::TextMismatch => "Text diff mismatch",
            TestFailure::MissingImage => "No expected image found",
            TestFailure::MissingImageHash => "No expected image checksum found",
            TestFailure::ImageMismatch => "Image mismatch",
            TestFailure::ImageHashMismatch => "Image checksum mismatch",
        };
        write!(f, "{}", message)
    }
}
