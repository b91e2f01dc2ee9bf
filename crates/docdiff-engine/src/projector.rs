//! Projections of a diff into presentation rows.
//!
//! The dual-pane projection produces two row sequences of identical length:
//! row `k` of the old pane sits next to row `k` of the new pane. Where one
//! side of a hunk is shorter, it is padded with [`RowKind::Pad`] rows, so the
//! panes stay synchronized at every hunk boundary. Renderers only consume
//! these rows and never re-derive padding themselves.
//!
//! The unified projection lists every line once, with no padding, and can be
//! windowed to a number of context lines around changes.

use std::fmt;

use crate::align::{EditOp, EditTag};
use crate::result::{DiffResult, Side};

/// What a projected row shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    Equal,
    Delete,
    Insert,
    Replace,
    /// Placeholder keeping the panes aligned; carries no line.
    Pad,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Delete => "delete",
            Self::Insert => "insert",
            Self::Replace => "replace",
            Self::Pad => "pad",
        }
    }
}

impl From<EditTag> for RowKind {
    fn from(tag: EditTag) -> Self {
        match tag {
            EditTag::Equal => Self::Equal,
            EditTag::Delete => Self::Delete,
            EditTag::Insert => Self::Insert,
            EditTag::Replace => Self::Replace,
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item with its 1-based position on its own side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberedLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// One row of one pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaneRow<'a> {
    pub kind: RowKind,
    pub line: Option<NumberedLine<'a>>,
}

impl<'a> PaneRow<'a> {
    pub fn pad() -> Self {
        Self {
            kind: RowKind::Pad,
            line: None,
        }
    }

    pub fn is_pad(&self) -> bool {
        self.kind == RowKind::Pad
    }

    pub fn text(&self) -> Option<&'a str> {
        self.line.map(|l| l.text)
    }

    pub fn number(&self) -> Option<usize> {
        self.line.map(|l| l.number)
    }
}

/// Both panes' view of one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignedRow<'a> {
    /// The kind of the hunk the row came from.
    pub kind: RowKind,
    pub old_line: Option<NumberedLine<'a>>,
    pub new_line: Option<NumberedLine<'a>>,
}

/// Two row-synchronized panes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DualPane<'a> {
    pub old_rows: Vec<PaneRow<'a>>,
    pub new_rows: Vec<PaneRow<'a>>,
    /// Hunk kind of each row.
    kinds: Vec<RowKind>,
}

impl<'a> DualPane<'a> {
    /// Number of rows (identical for both panes).
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate rows pairwise.
    pub fn rows(&self) -> impl Iterator<Item = AlignedRow<'a>> + '_ {
        self.kinds
            .iter()
            .zip(self.old_rows.iter().zip(&self.new_rows))
            .map(|(kind, (old, new))| AlignedRow {
                kind: *kind,
                old_line: old.line,
                new_line: new.line,
            })
    }

    fn push(&mut self, kind: RowKind, old: PaneRow<'a>, new: PaneRow<'a>) {
        self.kinds.push(kind);
        self.old_rows.push(old);
        self.new_rows.push(new);
    }
}

/// Project a diff result into two synchronized panes.
pub fn project(result: &DiffResult) -> DualPane<'_> {
    let old = result.items(Side::Old);
    let new = result.items(Side::New);
    project_ops(result.ops(), &old, &new)
}

/// Project an edit script over the given item sequences.
pub fn project_ops<'a, 'o>(
    ops: impl IntoIterator<Item = &'o EditOp>,
    old: &[&'a str],
    new: &[&'a str],
) -> DualPane<'a> {
    let mut pane = DualPane::default();
    for op in ops {
        let kind = RowKind::from(op.tag);
        let rows = op.old_len().max(op.new_len());
        for k in 0..rows {
            let old_row = side_row(kind, old, &op.old_range, k);
            let new_row = side_row(kind, new, &op.new_range, k);
            pane.push(kind, old_row, new_row);
        }
    }
    pane
}

fn side_row<'a>(kind: RowKind, items: &[&'a str], range: &std::ops::Range<usize>, k: usize) -> PaneRow<'a> {
    if k < range.len() {
        PaneRow {
            kind,
            line: Some(numbered(items, range.start + k)),
        }
    } else {
        PaneRow::pad()
    }
}

fn numbered<'a>(items: &[&'a str], index: usize) -> NumberedLine<'a> {
    NumberedLine {
        number: index + 1,
        text: items.get(index).copied().unwrap_or_default(),
    }
}

/// Which side(s) a unified line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    Old,
    New,
    Both,
}

/// One line of the unified projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnifiedLine<'a> {
    /// Kind of the hunk the line came from.
    pub kind: RowKind,
    pub origin: Origin,
    pub old_number: Option<usize>,
    pub new_number: Option<usize>,
    pub text: &'a str,
}

/// A unified line, or a run of unchanged lines left out by windowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnifiedRow<'a> {
    Line(UnifiedLine<'a>),
    Gap { skipped: usize },
}

/// Project a diff result into a single column.
///
/// With `context: Some(n)`, unchanged lines further than `n` lines from any
/// change collapse into [`UnifiedRow::Gap`]s.
pub fn project_unified(result: &DiffResult, context: Option<usize>) -> Vec<UnifiedRow<'_>> {
    let old = result.items(Side::Old);
    let new = result.items(Side::New);
    unified_ops(result.ops(), &old, &new, context)
}

/// Unified projection of an edit script over the given item sequences.
pub fn unified_ops<'a, 'o>(
    ops: impl IntoIterator<Item = &'o EditOp>,
    old: &[&'a str],
    new: &[&'a str],
    context: Option<usize>,
) -> Vec<UnifiedRow<'a>> {
    let mut lines = Vec::new();
    for op in ops {
        let kind = RowKind::from(op.tag);
        if op.tag == EditTag::Equal {
            for (i, j) in op.old_range.clone().zip(op.new_range.clone()) {
                let old_line = numbered(old, i);
                lines.push(UnifiedLine {
                    kind,
                    origin: Origin::Both,
                    old_number: Some(old_line.number),
                    new_number: Some(j + 1),
                    text: old_line.text,
                });
            }
            continue;
        }
        for i in op.old_range.clone() {
            let line = numbered(old, i);
            lines.push(UnifiedLine {
                kind,
                origin: Origin::Old,
                old_number: Some(line.number),
                new_number: None,
                text: line.text,
            });
        }
        for j in op.new_range.clone() {
            let line = numbered(new, j);
            lines.push(UnifiedLine {
                kind,
                origin: Origin::New,
                old_number: None,
                new_number: Some(line.number),
                text: line.text,
            });
        }
    }

    match context {
        Some(radius) => window(lines, radius),
        None => lines.into_iter().map(UnifiedRow::Line).collect(),
    }
}

fn window(lines: Vec<UnifiedLine<'_>>, radius: usize) -> Vec<UnifiedRow<'_>> {
    let is_change = |line: &UnifiedLine<'_>| line.kind != RowKind::Equal;
    let mut keep = vec![false; lines.len()];

    let mut last_change = None;
    for (i, line) in lines.iter().enumerate() {
        if is_change(line) {
            last_change = Some(i);
        }
        if last_change.is_some_and(|c| i - c <= radius) {
            keep[i] = true;
        }
    }
    let mut next_change = None;
    for (i, line) in lines.iter().enumerate().rev() {
        if is_change(line) {
            next_change = Some(i);
        }
        if next_change.is_some_and(|c| c - i <= radius) {
            keep[i] = true;
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (line, keep) in lines.into_iter().zip(keep) {
        if !keep {
            skipped += 1;
            continue;
        }
        if skipped > 0 {
            rows.push(UnifiedRow::Gap { skipped });
            skipped = 0;
        }
        rows.push(UnifiedRow::Line(line));
    }
    if skipped > 0 {
        rows.push(UnifiedRow::Gap { skipped });
    }
    rows
}
