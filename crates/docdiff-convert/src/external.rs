//! Formats that need an external extractor.

use std::path::Path;

use docdiff_types::{NormalizedDocument, SourceKind};

use crate::error::{ConvertError, ConvertResult};
use crate::traits::Converter;

/// Claims a binary format so it is never misread as text, and reports that
/// no extractor is available for it.
#[derive(Clone, Copy, Debug)]
pub struct ExternalFormatConverter {
    kind: SourceKind,
}

impl ExternalFormatConverter {
    pub fn new(kind: SourceKind) -> Self {
        Self { kind }
    }

    /// One converter per binary format.
    pub fn all() -> Vec<Self> {
        [
            SourceKind::Pdf,
            SourceKind::Docx,
            SourceKind::Xlsx,
            SourceKind::Pptx,
            SourceKind::Image,
        ]
        .into_iter()
        .map(Self::new)
        .collect()
    }
}

impl Converter for ExternalFormatConverter {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn extensions(&self) -> &[&str] {
        match self.kind {
            SourceKind::Pdf => &["pdf"],
            SourceKind::Docx => &["docx"],
            SourceKind::Xlsx => &["xlsx", "xls"],
            SourceKind::Pptx => &["pptx", "ppt"],
            SourceKind::Image => &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"],
            SourceKind::Text | SourceKind::Structured => &[],
        }
    }

    fn convert(&self, path: &Path) -> ConvertResult<NormalizedDocument> {
        if !path.exists() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }
        Err(ConvertError::ExtractorUnavailable {
            kind: self.kind,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_extractor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let conv = ExternalFormatConverter::new(SourceKind::Image);
        assert!(conv.can_convert(&path));
        let err = conv.convert(&path).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::ExtractorUnavailable {
                kind: SourceKind::Image,
                ..
            }
        ));
        assert!(err.to_string().contains(".ndoc"));
    }

    #[test]
    fn missing_file_reported_first() {
        let conv = ExternalFormatConverter::new(SourceKind::Pdf);
        let err = conv.convert(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn all_formats_claim_extensions() {
        for conv in ExternalFormatConverter::all() {
            assert!(!conv.extensions().is_empty(), "{}", conv.kind());
        }
    }
}
