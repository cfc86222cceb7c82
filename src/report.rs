//! Terminal reporting for single-test comparison outcomes.
//!
//! One PASS/FAIL line per test plus its failure descriptors, and an inline
//! colored diff for eyeballing text mismatches. Reports one test at a time;
//! aggregation across a run belongs to the hosting runner.

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::failure::TestFailure;

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

/// Prints per-test outcomes to stderr with optional ANSI color.
pub struct Reporter {
    pub use_colors: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

impl Reporter {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Prints one outcome line for a test, plus one line per failure.
    pub fn print_outcome(&self, test_name: &str, failures: &[TestFailure]) {
        if failures.is_empty() {
            eprintln!("{}: {}", self.colorize("PASS", GREEN), test_name);
            return;
        }
        eprintln!("{}: {}", self.colorize("FAIL", RED), test_name);
        for failure in failures {
            eprintln!("  - {}", failure);
        }
    }
}

/// Prints a colored line diff of expected vs. actual output to stdout.
pub fn print_inline_diff(expected: &str, actual: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(ref text) => {
                let _ = stdout.reset();
                println!(" {}", text);
            }
            Difference::Add(ref text) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                println!("+{}", text);
            }
            Difference::Rem(ref text) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                println!("-{}", text);
            }
        }
    }
    let _ = stdout.reset();
}
