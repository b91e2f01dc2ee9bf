//! The normalized document every converter produces.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::block::{MetadataValue, PositionalBlock, DEFAULT_LINE_HEIGHT};
use crate::error::TypeError;

/// The format family a document was extracted from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Text,
    Pdf,
    Docx,
    Xlsx,
    Pptx,
    Image,
    /// A document already serialized in normalized form.
    Structured,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
            Self::Image => "image",
            Self::Structured => "structured",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a document came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Path of the source file, if the document was read from disk.
    pub path: Option<PathBuf>,
    pub kind: SourceKind,
}

impl SourceInfo {
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: Some(path.into()),
            kind,
        }
    }

    /// The file name component of the source path.
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// Format-independent representation of a document.
///
/// `items` are the document's lines in reading order and are what line-mode
/// diffs compare. `positional_blocks` are ordered by page, then `y`, but are
/// not guaranteed to correspond 1:1 with `items`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedDocument {
    pub items: Vec<String>,
    pub full_text: String,
    pub positional_blocks: Vec<PositionalBlock>,
    pub page_count: u32,
    pub source: SourceInfo,
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl Default for NormalizedDocument {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            full_text: String::new(),
            positional_blocks: Vec::new(),
            page_count: 1,
            source: SourceInfo::default(),
            metadata: BTreeMap::new(),
        }
    }
}

impl NormalizedDocument {
    /// Build a single-page document from plain text.
    ///
    /// Every non-blank line also becomes a positional block placed at
    /// `index * DEFAULT_LINE_HEIGHT` and carrying its 1-based line number,
    /// so each block attaches to the hunk covering its own line.
    pub fn from_text(text: impl Into<String>, source: SourceInfo) -> Self {
        let full_text = text.into();
        let items = split_lines(&full_text);
        let positional_blocks = items
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                PositionalBlock::new(line.as_str())
                    .at(0, 0.0, i as f64 * DEFAULT_LINE_HEIGHT)
                    .with_size(0.0, DEFAULT_LINE_HEIGHT)
                    .with_line_number(i + 1)
            })
            .collect();

        Self {
            items,
            full_text,
            positional_blocks,
            page_count: 1,
            source,
            metadata: BTreeMap::new(),
        }
    }

    /// Build a document from extracted blocks; the text is the block texts
    /// joined by newlines.
    pub fn from_blocks(blocks: Vec<PositionalBlock>, page_count: u32, source: SourceInfo) -> Self {
        let full_text = blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            items: split_lines(&full_text),
            full_text,
            positional_blocks: blocks,
            page_count,
            source,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a document-level metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the document has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The text of every positional block, in order.
    pub fn block_texts(&self) -> Vec<&str> {
        self.positional_blocks.iter().map(|b| b.text.as_str()).collect()
    }

    /// A short human-readable name: the source file name, or `fallback`.
    pub fn display_name(&self, fallback: &str) -> String {
        self.source.file_name().unwrap_or_else(|| fallback.to_string())
    }

    /// Check the reading-order invariant on positional blocks.
    pub fn validate(&self) -> Result<(), TypeError> {
        for (index, block) in self.positional_blocks.iter().enumerate() {
            if !block.y.is_finite() || !block.x.is_finite() {
                return Err(TypeError::NonFiniteCoordinate { index });
            }
            if index == 0 {
                continue;
            }
            let prev = &self.positional_blocks[index - 1];
            if block.page < prev.page || (block.page == prev.page && block.y < prev.y) {
                return Err(TypeError::ReadingOrder {
                    index,
                    page: block.page,
                    y: block.y,
                    prev_page: prev.page,
                    prev_y: prev.y,
                });
            }
        }
        Ok(())
    }
}

/// Split text into line items.
///
/// Both `\n` and `\r\n` terminate a line; a trailing terminator does not
/// produce an extra empty item.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
