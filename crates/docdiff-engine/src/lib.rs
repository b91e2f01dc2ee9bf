//! Alignment and diff-projection engine for docdiff.
//!
//! Computes a minimal edit script between two normalized documents, groups
//! it into typed hunks carrying the positional blocks of each side, and
//! projects the result into synchronized dual panes or a unified column.
//!
//! # Key Types
//!
//! - [`DiffEngine`] / [`EngineConfig`] -- Entry point and its configuration
//! - [`Alignment`] / [`EditOp`] / [`EditTag`] -- Sequence aligner output
//! - [`Hunk`] / [`BlockLocator`] -- Edit ops with text and attached blocks
//! - [`DiffResult`] / [`DiffStats`] -- Aggregate outcome of one comparison
//! - [`DualPane`] / [`UnifiedRow`] -- Presentation-ready projections
//! - [`PatchHunk`] -- `diff -u` / `diff -c` sections over the same ops

pub mod align;
pub mod config;
pub mod engine;
pub mod error;
pub mod hunk;
pub mod patch;
pub mod projector;
pub mod result;
pub mod stats;

pub use align::{align, align_with, similarity_ratio, Algorithm, Alignment, EditOp, EditTag, MatchBlock};
pub use config::EngineConfig;
pub use engine::DiffEngine;
pub use error::{EngineError, EngineResult};
pub use hunk::{BlockLocator, Hunk, HunkBuilder};
pub use patch::{context_text, patch_hunks, unified_text, PatchHunk};
pub use projector::{
    project, project_unified, AlignedRow, DualPane, NumberedLine, Origin, PaneRow, RowKind, UnifiedLine,
    UnifiedRow,
};
pub use result::{DiffMode, DiffResult, Side};
pub use stats::DiffStats;
