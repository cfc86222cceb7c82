//! Per-test argument bundle passed by the runner to comparison code.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Optional extra settings a runner hands to a specific test's comparison.
///
/// Constructed fresh for every test invocation and discarded afterwards;
/// nothing in here is shared between tests. All fields default to
/// unset/false, so runners typically build one with
/// `TestArguments::default()` and assign the few fields a test needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestArguments {
    /// Outer directory in which to place newly recorded baseline results.
    pub new_baseline: Option<PathBuf>,

    /// Whether to save new text baselines too (otherwise only image results
    /// are recorded as baselines).
    pub text_baseline: bool,

    /// Path to the PNG file generated by a pixel test.
    pub png_path: Option<PathBuf>,

    /// Checksum of the image generated by a pixel test.
    pub checksum: Option<String>,

    /// Whether to shell out to wdiff to generate word-level diffs.
    pub wdiff: bool,

    /// Whether to report the locations of the expected result files used.
    pub show_sources: bool,
}
