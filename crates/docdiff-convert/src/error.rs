use std::path::PathBuf;

use docdiff_types::{SourceKind, TypeError};

/// Errors from converting a file into a normalized document.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the input failed.
    #[error("I/O error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The format needs an extractor this build does not have.
    #[error(
        "no extractor available for {kind} file {}; convert it to a .ndoc document first",
        .path.display()
    )]
    ExtractorUnavailable { kind: SourceKind, path: PathBuf },

    /// The input could not be decoded as its declared format.
    #[error("malformed document {}: {}", .path.display(), .reason)]
    Malformed { path: PathBuf, reason: String },

    /// The decoded document breaks a document invariant.
    #[error("invalid document {}: {}", .path.display(), .source)]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: TypeError,
    },
}

/// Result alias for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;
