//! Patch-style text (`diff -u` and `diff -c`) built from an edit script.
//!
//! Hunks come from the windowed unified projection, so the text always
//! agrees with the ops it was given: a patch hunk is a maximal run of kept
//! rows between two [`UnifiedRow::Gap`]s.

use std::fmt::Write as _;

use crate::align::EditOp;
use crate::projector::{unified_ops, Origin, RowKind, UnifiedLine, UnifiedRow};

/// One `@@` (or `***************`) section of a patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchHunk<'a> {
    /// Zero-based index of the first old item covered.
    pub old_start: usize,
    pub old_len: usize,
    /// Zero-based index of the first new item covered.
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<UnifiedLine<'a>>,
}

impl PatchHunk<'_> {
    fn has_old_changes(&self) -> bool {
        self.lines.iter().any(|l| l.origin == Origin::Old)
    }

    fn has_new_changes(&self) -> bool {
        self.lines.iter().any(|l| l.origin == Origin::New)
    }
}

/// Group an edit script into patch hunks with `context` unchanged lines
/// around each change. Identical inputs yield no hunks.
pub fn patch_hunks<'a, 'o>(
    ops: impl IntoIterator<Item = &'o EditOp>,
    old: &[&'a str],
    new: &[&'a str],
    context: usize,
) -> Vec<PatchHunk<'a>> {
    let mut hunks = Vec::new();
    let mut current: Option<PatchHunk<'a>> = None;
    let (mut old_pos, mut new_pos) = (0, 0);

    for row in unified_ops(ops, old, new, Some(context)) {
        match row {
            UnifiedRow::Gap { skipped } => {
                hunks.extend(current.take());
                old_pos += skipped;
                new_pos += skipped;
            }
            UnifiedRow::Line(line) => {
                let hunk = current.get_or_insert_with(|| PatchHunk {
                    old_start: old_pos,
                    old_len: 0,
                    new_start: new_pos,
                    new_len: 0,
                    lines: Vec::new(),
                });
                if line.origin != Origin::New {
                    hunk.old_len += 1;
                    old_pos += 1;
                }
                if line.origin != Origin::Old {
                    hunk.new_len += 1;
                    new_pos += 1;
                }
                hunk.lines.push(line);
            }
        }
    }
    hunks.extend(current);
    hunks.retain(|h| h.lines.iter().any(|l| l.kind != RowKind::Equal));
    hunks
}

/// Unified-diff text. Empty when the script has no changes.
pub fn unified_text<'o>(
    ops: impl IntoIterator<Item = &'o EditOp>,
    old: &[&str],
    new: &[&str],
    old_label: &str,
    new_label: &str,
    context: usize,
) -> String {
    let hunks = patch_hunks(ops, old, new, context);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = format!("--- {old_label}\n+++ {new_label}\n");
    for hunk in &hunks {
        let _ = writeln!(
            out,
            "@@ -{} +{} @@",
            unified_range(hunk.old_start, hunk.old_len),
            unified_range(hunk.new_start, hunk.new_len)
        );
        for line in &hunk.lines {
            let marker = match line.origin {
                Origin::Both => ' ',
                Origin::Old => '-',
                Origin::New => '+',
            };
            let _ = writeln!(out, "{marker}{}", line.text);
        }
    }
    out
}

/// Context-diff text. Empty when the script has no changes.
///
/// Replaced lines are marked `!` on both sides, deletions `-` and
/// insertions `+`. A side with no changes in a hunk prints only its range.
pub fn context_text<'o>(
    ops: impl IntoIterator<Item = &'o EditOp>,
    old: &[&str],
    new: &[&str],
    old_label: &str,
    new_label: &str,
    context: usize,
) -> String {
    let hunks = patch_hunks(ops, old, new, context);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = format!("*** {old_label}\n--- {new_label}\n");
    for hunk in &hunks {
        out.push_str("***************\n");
        let _ = writeln!(out, "*** {} ****", context_range(hunk.old_start, hunk.old_len));
        if hunk.has_old_changes() {
            for line in hunk.lines.iter().filter(|l| l.origin != Origin::New) {
                let _ = writeln!(out, "{}{}", context_marker(line), line.text);
            }
        }
        let _ = writeln!(out, "--- {} ----", context_range(hunk.new_start, hunk.new_len));
        if hunk.has_new_changes() {
            for line in hunk.lines.iter().filter(|l| l.origin != Origin::Old) {
                let _ = writeln!(out, "{}{}", context_marker(line), line.text);
            }
        }
    }
    out
}

fn context_marker(line: &UnifiedLine<'_>) -> &'static str {
    match (line.origin, line.kind) {
        (Origin::Both, _) => "  ",
        (_, RowKind::Replace) => "! ",
        (Origin::Old, _) => "- ",
        (Origin::New, _) => "+ ",
    }
}

fn unified_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{len}", start + 1),
    }
}

fn context_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start}"),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, start + len),
    }
}
