//! Unified line diffs between expected and actual test output.
//!
//! Renders the standard unified-diff format (`---`/`+++` headers, `@@` hunk
//! ranges, three lines of context) from the line-level changesets produced
//! by the `difference` crate. Identical inputs yield an empty string so
//! callers can persist "no differences" as an empty diff file. A final line
//! without a terminator is annotated with the standard
//! `\ No newline at end of file` marker, so contents differing only in a
//! trailing newline still produce a hunk.

use difference::{Changeset, Difference};

const CONTEXT: usize = 3;
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Same,
    Remove,
    Add,
}

struct Hunk {
    old_start: usize,
    old_len: usize,
    new_start: usize,
    new_len: usize,
    lines: Vec<String>,
}

/// Op indices of each side's final line, set only when that side lacks a
/// trailing terminator and therefore needs the no-newline annotation.
struct TailInfo {
    last_expected: Option<usize>,
    last_actual: Option<usize>,
}

/// Renders a unified diff of `expected` against `actual`.
///
/// The labels name the two sides in the `---`/`+++` headers; the writer
/// passes the expected and actual artifact paths. Every emitted line is
/// newline-terminated, with unterminated final lines flagged by the
/// no-newline marker. Equal inputs produce an empty string, with no headers
/// and no hunks.
pub fn unified_diff(
    expected: &str,
    actual: &str,
    expected_label: &str,
    actual_label: &str,
) -> String {
    if expected == actual {
        return String::new();
    }

    let expected_unterminated = !expected.is_empty() && !expected.ends_with('\n');
    let actual_unterminated = !actual.is_empty() && !actual.ends_with('\n');

    let mut ops = line_ops(expected, actual);
    split_unterminated_same(&mut ops, expected_unterminated, actual_unterminated);
    let tail = TailInfo {
        last_expected: ops
            .iter()
            .rposition(|(op, _)| *op != Op::Add)
            .filter(|_| expected_unterminated),
        last_actual: ops
            .iter()
            .rposition(|(op, _)| *op != Op::Remove)
            .filter(|_| actual_unterminated),
    };
    let hunks = group_hunks(&ops, &tail);

    let mut out = String::new();
    out.push_str(&format!("--- {}\n", expected_label));
    out.push_str(&format!("+++ {}\n", actual_label));
    for hunk in hunks {
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(hunk.old_start, hunk.old_len),
            format_range(hunk.new_start, hunk.new_len)
        ));
        for line in hunk.lines {
            out.push_str(&line);
        }
    }
    out
}

/// Splits content into lines without terminators. A single trailing newline
/// does not contribute a phantom empty line.
fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix('\n').unwrap_or(content);
    body.split('\n').collect()
}

/// Flattens the changeset into one op per line.
///
/// A wholly empty side is handled up front: the line tokenizer cannot
/// represent an empty sequence of lines, so "" would otherwise diff as one
/// empty line instead of zero lines.
fn line_ops(expected: &str, actual: &str) -> Vec<(Op, String)> {
    if expected.is_empty() {
        return split_lines(actual)
            .into_iter()
            .map(|line| (Op::Add, line.to_string()))
            .collect();
    }
    if actual.is_empty() {
        return split_lines(expected)
            .into_iter()
            .map(|line| (Op::Remove, line.to_string()))
            .collect();
    }

    let expected_body = expected.strip_suffix('\n').unwrap_or(expected);
    let actual_body = actual.strip_suffix('\n').unwrap_or(actual);
    let changeset = Changeset::new(expected_body, actual_body, "\n");

    let mut ops = Vec::new();
    for diff in changeset.diffs {
        let (op, chunk) = match diff {
            Difference::Same(text) => (Op::Same, text),
            Difference::Rem(text) => (Op::Remove, text),
            Difference::Add(text) => (Op::Add, text),
        };
        for line in chunk.split('\n') {
            ops.push((op, line.to_string()));
        }
    }
    ops
}

/// Repairs the changeset where terminator status makes matched lines
/// unequal.
///
/// The line tokenizer drops terminators, so a `Same` op may pair a final
/// line lacking its newline with a terminated partner. Those two lines are
/// not equal; the op becomes a remove/add pair. A `Same` op pairing the two
/// final lines stays when both sides lack the terminator.
fn split_unterminated_same(
    ops: &mut Vec<(Op, String)>,
    expected_unterminated: bool,
    actual_unterminated: bool,
) {
    if !expected_unterminated && !actual_unterminated {
        return;
    }
    let last_expected = ops.iter().rposition(|(op, _)| *op != Op::Add);
    let last_actual = ops.iter().rposition(|(op, _)| *op != Op::Remove);

    let mut split_at = None;
    if let Some(i) = last_expected {
        if expected_unterminated
            && ops[i].0 == Op::Same
            && !(last_actual == Some(i) && actual_unterminated)
        {
            split_at = Some(i);
        }
    }
    if split_at.is_none() {
        if let Some(i) = last_actual {
            if actual_unterminated
                && ops[i].0 == Op::Same
                && !(last_expected == Some(i) && expected_unterminated)
            {
                split_at = Some(i);
            }
        }
    }

    if let Some(i) = split_at {
        let text = ops[i].1.clone();
        ops[i] = (Op::Remove, text.clone());
        ops.insert(i + 1, (Op::Add, text));
    }
}

/// Groups changed lines into hunks with [`CONTEXT`] lines of surrounding
/// context, merging hunks whose context would overlap.
fn group_hunks(ops: &[(Op, String)], tail: &TailInfo) -> Vec<Hunk> {
    let n = ops.len();

    // Line numbers on each side at every op boundary.
    let mut old_at = Vec::with_capacity(n + 1);
    let mut new_at = Vec::with_capacity(n + 1);
    let (mut old_line, mut new_line) = (0usize, 0usize);
    for (op, _) in ops {
        old_at.push(old_line);
        new_at.push(new_line);
        match op {
            Op::Same => {
                old_line += 1;
                new_line += 1;
            }
            Op::Remove => old_line += 1,
            Op::Add => new_line += 1,
        }
    }
    old_at.push(old_line);
    new_at.push(new_line);

    let mut hunks = Vec::new();
    let mut prev_end = 0usize;
    let mut i = 0usize;
    while i < n {
        if ops[i].0 == Op::Same {
            i += 1;
            continue;
        }

        let start = i.saturating_sub(CONTEXT).max(prev_end);
        let mut last_change = i;
        let mut j = i + 1;
        while j < n {
            if ops[j].0 != Op::Same {
                last_change = j;
                j += 1;
                continue;
            }
            let mut k = j;
            while k < n && ops[k].0 == Op::Same {
                k += 1;
            }
            // A short run of unchanged lines between changes stays inside
            // the same hunk; a longer one ends it.
            if k < n && k - j <= 2 * CONTEXT {
                j = k;
            } else {
                break;
            }
        }
        let end = (last_change + 1 + CONTEXT).min(n);

        let mut lines = Vec::with_capacity(end - start);
        for (offset, (op, text)) in ops[start..end].iter().enumerate() {
            let idx = start + offset;
            let prefix = match op {
                Op::Same => ' ',
                Op::Remove => '-',
                Op::Add => '+',
            };
            lines.push(format!("{}{}\n", prefix, text));
            if tail.last_expected == Some(idx) || tail.last_actual == Some(idx) {
                lines.push(NO_NEWLINE_MARKER.to_string());
            }
        }

        hunks.push(Hunk {
            old_start: old_at[start],
            old_len: old_at[end] - old_at[start],
            new_start: new_at[start],
            new_len: new_at[end] - new_at[start],
            lines,
        });
        prev_end = end;
        i = end;
    }
    hunks
}

/// Formats one side of an `@@` range: 1-based start, length omitted when it
/// is exactly one line, start shown as the preceding line for empty ranges.
fn format_range(start: usize, len: usize) -> String {
    if len == 1 {
        return format!("{}", start + 1);
    }
    let beginning = if len == 0 { start } else { start + 1 };
    format!("{},{}", beginning, len)
}
