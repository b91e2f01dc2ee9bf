use std::path::Path;

use docdiff_types::{NormalizedDocument, SourceKind};

use crate::error::ConvertResult;

/// Turns one family of file formats into normalized documents.
///
/// Implementations must not return an empty document in place of a failure:
/// a missing or unreadable file is an error.
pub trait Converter: Send + Sync {
    /// The kind of source this converter reads.
    fn kind(&self) -> SourceKind;

    /// Lowercase file extensions handled, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Whether `path` has one of this converter's extensions.
    fn can_convert(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }

    /// Convert the file at `path`.
    fn convert(&self, path: &Path) -> ConvertResult<NormalizedDocument>;
}

/// Lowercase extension of `path`, without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
