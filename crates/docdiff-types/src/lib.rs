//! Foundation types for docdiff.
//!
//! Every converter produces a [`NormalizedDocument`]; the diff engine and the
//! renderers only ever see documents in this shape, never the original file
//! format.
//!
//! # Key Types
//!
//! - [`NormalizedDocument`] -- Ordered line items, full text, and positional blocks
//! - [`PositionalBlock`] -- A text fragment with page coordinates and metadata
//! - [`MetadataValue`] -- Scalar metadata value (bool, integer, float, text)
//! - [`SourceInfo`] / [`SourceKind`] -- Where a document was extracted from

pub mod block;
pub mod document;
pub mod error;

pub use block::{MetadataValue, PositionalBlock, DEFAULT_LINE_HEIGHT, LINE_NUMBER_KEY};
pub use document::{split_lines, NormalizedDocument, SourceInfo, SourceKind};
pub use error::TypeError;
