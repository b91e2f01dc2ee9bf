//! Serialized normalized documents (`.ndoc`).
//!
//! This is the hand-off format for external extractors: a PDF, office, or
//! OCR pipeline writes the document as JSON and docdiff compares it like any
//! other input.

use std::path::Path;

use tracing::debug;

use docdiff_types::{split_lines, NormalizedDocument, SourceKind};

use crate::error::{ConvertError, ConvertResult};
use crate::traits::Converter;

const EXTENSIONS: &[&str] = &["ndoc"];

#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedJsonConverter;

impl NormalizedJsonConverter {
    /// Parse a serialized document.
    ///
    /// Missing `items` are derived from `full_text`, and a missing
    /// `full_text` from the block texts. The source path defaults to `path`.
    pub fn parse(&self, json: &str, path: &Path) -> ConvertResult<NormalizedDocument> {
        let mut doc: NormalizedDocument =
            serde_json::from_str(json).map_err(|e| ConvertError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if doc.full_text.is_empty() && !doc.positional_blocks.is_empty() {
            doc.full_text = doc.block_texts().join("\n");
        }
        if doc.items.is_empty() {
            doc.items = split_lines(&doc.full_text);
        }
        if doc.source.path.is_none() {
            doc.source.path = Some(path.to_path_buf());
        }

        doc.validate().map_err(|source| ConvertError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(doc)
    }
}

impl Converter for NormalizedJsonConverter {
    fn kind(&self) -> SourceKind {
        SourceKind::Structured
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn convert(&self, path: &Path) -> ConvertResult<NormalizedDocument> {
        let json = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConvertError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => ConvertError::Malformed {
                path: path.to_path_buf(),
                reason: "not valid UTF-8".to_string(),
            },
            _ => ConvertError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let doc = self.parse(&json, path)?;
        debug!(
            path = %path.display(),
            kind = %doc.source.kind,
            items = doc.items.len(),
            blocks = doc.positional_blocks.len(),
            "loaded normalized document"
        );
        Ok(doc)
    }
}
