//! The aggregate outcome of comparing two documents.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use docdiff_types::NormalizedDocument;

use crate::align::{Algorithm, EditOp};
use crate::hunk::Hunk;
use crate::stats::DiffStats;

/// What the items of a diff are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Lines of the documents' full text.
    #[default]
    Lines,
    /// Positional blocks, for position-accurate hunks.
    Blocks,
}

/// One of the two compared documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Old => "old",
            Self::New => "new",
        })
    }
}

/// Hunks, similarity, and stats for one document pair.
///
/// Immutable once built. The source documents are shared read-only.
#[derive(Clone, Debug)]
pub struct DiffResult {
    pub hunks: Vec<Hunk>,
    pub similarity_ratio: f64,
    pub stats: DiffStats,
    pub mode: DiffMode,
    /// The aligner that produced the hunks.
    pub algorithm: Algorithm,
    old_doc: Arc<NormalizedDocument>,
    new_doc: Arc<NormalizedDocument>,
}

impl DiffResult {
    pub(crate) fn new(
        hunks: Vec<Hunk>,
        similarity_ratio: f64,
        mode: DiffMode,
        algorithm: Algorithm,
        old_doc: Arc<NormalizedDocument>,
        new_doc: Arc<NormalizedDocument>,
    ) -> Self {
        let stats = DiffStats::from_ops(hunks.iter().map(|h| &h.op));
        Self {
            hunks,
            similarity_ratio,
            stats,
            mode,
            algorithm,
            old_doc,
            new_doc,
        }
    }

    pub fn old_doc(&self) -> &NormalizedDocument {
        &self.old_doc
    }

    pub fn new_doc(&self) -> &NormalizedDocument {
        &self.new_doc
    }

    /// Returns `true` if any hunk is not `Equal`.
    pub fn has_changes(&self) -> bool {
        self.hunks.iter().any(Hunk::is_change)
    }

    /// The non-`Equal` hunks, in order.
    pub fn changes_only(&self) -> impl Iterator<Item = &Hunk> {
        self.hunks.iter().filter(|h| h.is_change())
    }

    /// The edit script underlying the hunks.
    pub fn ops(&self) -> impl Iterator<Item = &EditOp> {
        self.hunks.iter().map(|h| &h.op)
    }

    /// The item sequence of one side, as it was aligned.
    pub fn items(&self, side: Side) -> Vec<&str> {
        let doc = match side {
            Side::Old => &self.old_doc,
            Side::New => &self.new_doc,
        };
        match self.mode {
            DiffMode::Lines => doc.items.iter().map(String::as_str).collect(),
            DiffMode::Blocks => doc.block_texts(),
        }
    }
}
