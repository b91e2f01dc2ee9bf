//! Hunks: edit ops enriched with joined text and attached positional blocks.

use std::ops::Range;

use docdiff_types::{NormalizedDocument, PositionalBlock};

use crate::align::{EditOp, EditTag};

/// One span of a diff with the content on each side.
#[derive(Clone, Debug, PartialEq)]
pub struct Hunk {
    pub op: EditOp,
    /// Old items of the span joined by newlines.
    pub old_text: String,
    /// New items of the span joined by newlines.
    pub new_text: String,
    /// Positional blocks of the old document attached to this span.
    pub old_blocks: Vec<PositionalBlock>,
    /// Positional blocks of the new document attached to this span.
    pub new_blocks: Vec<PositionalBlock>,
}

impl Hunk {
    pub fn kind(&self) -> EditTag {
        self.op.tag
    }

    pub fn old_range(&self) -> Range<usize> {
        self.op.old_range.clone()
    }

    pub fn new_range(&self) -> Range<usize> {
        self.op.new_range.clone()
    }

    /// Returns `true` for every kind except `Equal`.
    pub fn is_change(&self) -> bool {
        self.op.tag != EditTag::Equal
    }
}

/// Assigns positional blocks to line ranges.
///
/// A block's line is its explicit `line_number` metadata, or else
/// `floor(y / line_height)`. The estimate is only as good as the pitch: a
/// document laid out with a different line spacing will have its blocks
/// attributed to the wrong lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockLocator {
    line_height: f64,
}

impl BlockLocator {
    pub fn new(line_height: f64) -> Self {
        Self { line_height }
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// The declared or estimated line of a block.
    pub fn line_of(&self, block: &PositionalBlock) -> usize {
        block.line_number().unwrap_or_else(|| {
            let estimate = (block.y / self.line_height).floor();
            if estimate.is_finite() && estimate > 0.0 {
                estimate as usize
            } else {
                0
            }
        })
    }

    /// Whether a block belongs to `range`: `range.start < line <= range.end`.
    ///
    /// Line numbers are 1-based while ranges index 0-based items, hence the
    /// shifted bounds.
    pub fn contains(&self, range: &Range<usize>, block: &PositionalBlock) -> bool {
        let line = self.line_of(block);
        range.start < line && line <= range.end
    }

    /// Clone every block that falls in `range`, preserving order.
    pub fn blocks_in(&self, blocks: &[PositionalBlock], range: &Range<usize>) -> Vec<PositionalBlock> {
        blocks
            .iter()
            .filter(|block| self.contains(range, block))
            .cloned()
            .collect()
    }
}

/// Builds hunks for one pair of documents.
pub struct HunkBuilder<'a> {
    old: &'a NormalizedDocument,
    new: &'a NormalizedDocument,
    locator: BlockLocator,
}

impl<'a> HunkBuilder<'a> {
    pub fn new(old: &'a NormalizedDocument, new: &'a NormalizedDocument, locator: BlockLocator) -> Self {
        Self { old, new, locator }
    }

    /// Hunks for a script computed over the documents' line items.
    pub fn build_lines(&self, ops: &[EditOp]) -> Vec<Hunk> {
        ops.iter()
            .map(|op| Hunk {
                op: op.clone(),
                old_text: join_items(&self.old.items[op.old_range.clone()]),
                new_text: join_items(&self.new.items[op.new_range.clone()]),
                old_blocks: self.locator.blocks_in(&self.old.positional_blocks, &op.old_range),
                new_blocks: self.locator.blocks_in(&self.new.positional_blocks, &op.new_range),
            })
            .collect()
    }

    /// Hunks for a script computed over the documents' positional blocks.
    ///
    /// Ranges index blocks, and each side carries exactly the blocks of its
    /// range.
    pub fn build_blocks(&self, ops: &[EditOp]) -> Vec<Hunk> {
        ops.iter()
            .map(|op| {
                let old_blocks = self.old.positional_blocks[op.old_range.clone()].to_vec();
                let new_blocks = self.new.positional_blocks[op.new_range.clone()].to_vec();
                Hunk {
                    op: op.clone(),
                    old_text: join_block_text(&old_blocks),
                    new_text: join_block_text(&new_blocks),
                    old_blocks,
                    new_blocks,
                }
            })
            .collect()
    }
}

fn join_items(items: &[String]) -> String {
    items.join("\n")
}

fn join_block_text(blocks: &[PositionalBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
