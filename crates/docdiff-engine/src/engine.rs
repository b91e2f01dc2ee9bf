//! The diff engine: alignment, hunk building, and stats for a document pair.

use std::sync::Arc;

use tracing::debug;

use docdiff_types::NormalizedDocument;

use crate::align::{align_with, EditOp};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::hunk::{BlockLocator, HunkBuilder};
use crate::result::{DiffMode, DiffResult, Side};
use crate::patch;

/// Compares normalized documents under a fixed configuration.
///
/// The engine holds no mutable state; one instance can serve any number of
/// comparisons, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct DiffEngine {
    config: EngineConfig,
}

impl DiffEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Diff the documents' line items.
    pub fn diff(
        &self,
        old: impl Into<Arc<NormalizedDocument>>,
        new: impl Into<Arc<NormalizedDocument>>,
    ) -> EngineResult<DiffResult> {
        let (old, new) = (old.into(), new.into());
        self.check_size(Side::Old, old.items.len())?;
        self.check_size(Side::New, new.items.len())?;

        let alignment = align_with(&old.items, &new.items, self.config.algorithm);
        let locator = BlockLocator::new(self.config.line_height);
        let hunks = HunkBuilder::new(&old, &new, locator).build_lines(&alignment.ops);

        debug!(
            mode = "lines",
            algorithm = %self.config.algorithm,
            old_items = old.items.len(),
            new_items = new.items.len(),
            hunks = hunks.len(),
            similarity = alignment.similarity,
            "diff computed"
        );
        Ok(DiffResult::new(hunks, alignment.similarity, DiffMode::Lines, self.config.algorithm, old, new))
    }

    /// Diff the documents' positional blocks by their text.
    pub fn diff_blocks(
        &self,
        old: impl Into<Arc<NormalizedDocument>>,
        new: impl Into<Arc<NormalizedDocument>>,
    ) -> EngineResult<DiffResult> {
        let (old, new) = (old.into(), new.into());
        self.check_size(Side::Old, old.positional_blocks.len())?;
        self.check_size(Side::New, new.positional_blocks.len())?;

        let old_texts = old.block_texts();
        let new_texts = new.block_texts();
        let alignment = align_with(&old_texts, &new_texts, self.config.algorithm);
        let locator = BlockLocator::new(self.config.line_height);
        let hunks = HunkBuilder::new(&old, &new, locator).build_blocks(&alignment.ops);

        debug!(
            mode = "blocks",
            algorithm = %self.config.algorithm,
            old_blocks = old_texts.len(),
            new_blocks = new_texts.len(),
            hunks = hunks.len(),
            similarity = alignment.similarity,
            "diff computed"
        );
        Ok(DiffResult::new(hunks, alignment.similarity, DiffMode::Blocks, self.config.algorithm, old, new))
    }

    /// Diff in the configured mode.
    pub fn compare(
        &self,
        old: impl Into<Arc<NormalizedDocument>>,
        new: impl Into<Arc<NormalizedDocument>>,
    ) -> EngineResult<DiffResult> {
        match self.config.mode {
            DiffMode::Lines => self.diff(old, new),
            DiffMode::Blocks => self.diff_blocks(old, new),
        }
    }

    /// Classic unified-diff text over the documents' line items.
    ///
    /// Empty when the documents have identical items.
    pub fn unified_diff(
        &self,
        old: &NormalizedDocument,
        new: &NormalizedDocument,
        old_label: &str,
        new_label: &str,
    ) -> EngineResult<String> {
        self.patch(old, new, |ops, o, n| {
            patch::unified_text(ops, o, n, old_label, new_label, self.config.context_lines)
        })
    }

    /// Context-diff text (`***`/`---` sections) over the documents' line
    /// items, from the same alignment as [`DiffEngine::unified_diff`].
    pub fn context_diff(
        &self,
        old: &NormalizedDocument,
        new: &NormalizedDocument,
        old_label: &str,
        new_label: &str,
    ) -> EngineResult<String> {
        self.patch(old, new, |ops, o, n| {
            patch::context_text(ops, o, n, old_label, new_label, self.config.context_lines)
        })
    }

    fn patch(
        &self,
        old: &NormalizedDocument,
        new: &NormalizedDocument,
        format: impl FnOnce(&[EditOp], &[&str], &[&str]) -> String,
    ) -> EngineResult<String> {
        self.check_size(Side::Old, old.items.len())?;
        self.check_size(Side::New, new.items.len())?;
        let alignment = align_with(&old.items, &new.items, self.config.algorithm);
        let old_items: Vec<&str> = old.items.iter().map(String::as_str).collect();
        let new_items: Vec<&str> = new.items.iter().map(String::as_str).collect();
        Ok(format(alignment.ops.as_slice(), old_items.as_slice(), new_items.as_slice()))
    }

    fn check_size(&self, side: Side, len: usize) -> EngineResult<()> {
        match self.config.max_items {
            Some(limit) if len > limit => Err(EngineError::InputTooLarge { side, len, limit }),
            _ => Ok(()),
        }
    }
}
