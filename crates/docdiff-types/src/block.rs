//! Positional blocks: text fragments anchored to page coordinates.
//!
//! Converters for paginated formats emit one [`PositionalBlock`] per text run
//! they recover, together with whatever scalar metadata the extractor knows
//! about it (most importantly an explicit `line_number`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default vertical pitch between consecutive lines, in document units.
pub const DEFAULT_LINE_HEIGHT: f64 = 12.0;

/// Metadata key holding a block's explicit 1-based line number.
pub const LINE_NUMBER_KEY: &str = "line_number";

/// A scalar metadata value attached to a block or document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetadataValue {
    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A fragment of document text with its position on a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionalBlock {
    /// The text content of the block.
    pub text: String,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    /// Left edge.
    #[serde(default)]
    pub x: f64,
    /// Top edge, growing downwards within a page.
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Open scalar metadata, e.g. `line_number`, `sheet`, `slide`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl PositionalBlock {
    /// Create a block at the origin of the first page.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Place the block on `page` at `(x, y)`.
    pub fn at(mut self, page: u32, x: f64, y: f64) -> Self {
        self.page = page;
        self.x = x;
        self.y = y;
        self
    }

    /// Set the block's bounding box size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach an explicit 1-based line number.
    pub fn with_line_number(self, line: usize) -> Self {
        self.with_metadata(LINE_NUMBER_KEY, line)
    }

    /// The explicit 1-based line number, if the block declares one.
    ///
    /// Zero, negative, and non-integer values count as "not declared".
    pub fn line_number(&self) -> Option<usize> {
        self.metadata
            .get(LINE_NUMBER_KEY)
            .and_then(MetadataValue::as_i64)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
    }
}
