//! Word-level HTML diffs via the external wdiff tool.
//!
//! Shells out to wdiff with sentinel tokens marking delete/insert runs,
//! HTML-escapes the captured output, swaps the sentinels for styled spans,
//! and wraps the result in a minimal standalone document. The subprocess is
//! waited on with a bounded deadline so a wedged tool can never hang a test
//! forever, and abnormal exits are reported instead of being mistaken for an
//! empty diff.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::HarnessError;

/// Sentinel tokens handed to wdiff so its plain-text output can be rewritten
/// into HTML after escaping.
pub const START_DELETE: &str = "##WDIFF_DEL##";
pub const START_INSERT: &str = "##WDIFF_ADD##";
pub const END_MARKER: &str = "##WDIFF_END##";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Resolves platform-specific locations of external tooling.
///
/// Implemented by the hosting runner, which knows where the wdiff binary
/// lives for the platform it is driving.
pub trait PlatformUtils {
    /// Filesystem path to the wdiff executable for the current platform.
    fn wdiff_executable(&self) -> PathBuf;
}

/// Runs wdiff over a pair of result files and renders its output as HTML.
pub struct WordDiffRunner {
    executable: PathBuf,
    timeout: Duration,
}

impl WordDiffRunner {
    pub fn new(platform: &dyn PlatformUtils) -> Self {
        Self::with_executable(platform.wdiff_executable())
    }

    /// Builds a runner around an explicit executable path, bypassing the
    /// platform lookup.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the default 30s deadline for the subprocess.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produces the standalone HTML word-diff document for the actual and
    /// expected result files already on disk.
    ///
    /// wdiff exit codes 0 and 1 both count as success (1 only reports that
    /// differences were found); anything else, or death by signal, surfaces
    /// as [`HarnessError::WordDiffFailed`].
    pub fn render(&self, actual: &Path, expected: &Path) -> Result<String, HarnessError> {
        let mut child = Command::new(&self.executable)
            .arg(format!("--start-delete={}", START_DELETE))
            .arg(format!("--end-delete={}", END_MARKER))
            .arg(format!("--start-insert={}", START_INSERT))
            .arg(format!("--end-insert={}", END_MARKER))
            .arg(actual)
            .arg(expected)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| HarnessError::WordDiffLaunch {
                program: self.executable.clone(),
                source,
            })?;

        let (status, output) = self.wait_with_deadline(&mut child)?;
        match status.code() {
            Some(0) | Some(1) => {}
            code => {
                return Err(HarnessError::WordDiffFailed {
                    program: self.executable.clone(),
                    code,
                });
            }
        }

        let text = String::from_utf8(output)
            .map_err(|_| HarnessError::InvalidUtf8 { what: "wdiff output" })?;
        Ok(render_html(&text))
    }

    /// Waits for the child to exit, draining its stdout on a helper thread
    /// so a full pipe cannot wedge either side. Past the deadline the child
    /// is killed and the wait reported as a timeout.
    fn wait_with_deadline(
        &self,
        child: &mut Child,
    ) -> Result<(ExitStatus, Vec<u8>), HarnessError> {
        let reader = child.stdout.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(HarnessError::WordDiffTimeout {
                            program: self.executable.clone(),
                            secs: self.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    return Err(HarnessError::WordDiffWait {
                        program: self.executable.clone(),
                        source,
                    });
                }
            }
        };

        let output = reader
            .map(|handle| handle.join().unwrap_or_default())
            .unwrap_or_default();
        Ok((status, output))
    }
}

// =====================
// HTML rendering
// =====================

/// Escapes raw wdiff output and swaps the sentinel tokens for styled spans,
/// wrapped as a minimal standalone document: deletions pink, insertions
/// green, content preformatted.
fn render_html(raw: &str) -> String {
    let body = escape_html(raw)
        .replace(START_DELETE, "<span class=del>")
        .replace(START_INSERT, "<span class=add>")
        .replace(END_MARKER, "</span>");
    format!(
        "<head><style>.del {{ background: #faa; }} .add {{ background: #afa; }}</style></head><pre>{}</pre>",
        body
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_html_substitutes_sentinels() {
        let raw = "same ##WDIFF_DEL##old##WDIFF_END## ##WDIFF_ADD##new##WDIFF_END##";
        let html = render_html(raw);
        assert!(html.contains("<span class=del>old</span>"));
        assert!(html.contains("<span class=add>new</span>"));
        assert!(!html.contains("##WDIFF"));
    }

    #[test]
    fn render_html_escapes_markup_before_substitution() {
        let html = render_html("##WDIFF_DEL##<b>&x</b>##WDIFF_END##");
        assert!(html.contains("<span class=del>&lt;b&gt;&amp;x&lt;/b&gt;</span>"));
    }

    #[test]
    fn render_html_wraps_a_preformatted_document() {
        let html = render_html("plain");
        assert!(html.starts_with(
            "<head><style>.del { background: #faa; } .add { background: #afa; }</style></head>"
        ));
        assert!(html.ends_with("<pre>plain</pre>"));
    }
}
