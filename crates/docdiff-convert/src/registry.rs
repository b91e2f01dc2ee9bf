//! Converter selection by file extension.

use std::path::Path;

use tracing::{debug, info};

use docdiff_types::NormalizedDocument;

use crate::error::{ConvertError, ConvertResult};
use crate::external::ExternalFormatConverter;
use crate::json::NormalizedJsonConverter;
use crate::text::TextConverter;
use crate::traits::{extension_of, Converter};

/// The set of converters available to the CLI.
///
/// Files whose extension no converter claims are read as text.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
    fallback: TextConverter,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_text(TextConverter::default())
    }
}

impl ConverterRegistry {
    /// A registry with the built-in converters and the given text converter.
    pub fn with_text(text: TextConverter) -> Self {
        let mut registry = Self {
            converters: Vec::new(),
            fallback: text.clone(),
        };
        registry.register(text);
        registry.register(NormalizedJsonConverter);
        for external in ExternalFormatConverter::all() {
            registry.register(external);
        }
        registry
    }

    /// Add a converter. Later registrations take precedence.
    pub fn register(&mut self, converter: impl Converter + 'static) {
        self.converters.push(Box::new(converter));
    }

    /// The converter for `path`, by lowercase extension.
    pub fn for_path(&self, path: &Path) -> &dyn Converter {
        self.converters
            .iter()
            .rev()
            .find(|c| c.can_convert(path))
            .map(|c| &**c)
            .unwrap_or(&self.fallback)
    }

    /// Convert the file at `path`, failing with `NotFound` if it is absent.
    pub fn load(&self, path: &Path) -> ConvertResult<NormalizedDocument> {
        if !path.exists() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }
        let converter = self.for_path(path);
        if !converter.can_convert(path) {
            info!(
                path = %path.display(),
                extension = extension_of(path).unwrap_or_default(),
                "unknown extension, reading as text"
            );
        }
        let doc = converter.convert(path)?;
        doc.validate().map_err(|source| ConvertError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            kind = %converter.kind(),
            items = doc.items.len(),
            "converted"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdiff_types::SourceKind;
    use std::fs;

    #[test]
    fn picks_by_extension() {
        let registry = ConverterRegistry::default();
        assert_eq!(registry.for_path(Path::new("a.txt")).kind(), SourceKind::Text);
        assert_eq!(registry.for_path(Path::new("a.ndoc")).kind(), SourceKind::Structured);
        assert_eq!(registry.for_path(Path::new("a.PDF")).kind(), SourceKind::Pdf);
        assert_eq!(registry.for_path(Path::new("deck.ppt")).kind(), SourceKind::Pptx);
        assert_eq!(registry.for_path(Path::new("photo.jpeg")).kind(), SourceKind::Image);
    }

    #[test]
    fn unknown_extension_falls_back_to_text() {
        let registry = ConverterRegistry::default();
        assert_eq!(registry.for_path(Path::new("data.weird")).kind(), SourceKind::Text);
        assert_eq!(registry.for_path(Path::new("Makefile")).kind(), SourceKind::Text);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        fs::write(&path, "FROM scratch\n").unwrap();
        let doc = registry.load(&path).unwrap();
        assert_eq!(doc.items, vec!["FROM scratch"]);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConverterRegistry::default()
            .load(&dir.path().join("gone.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn load_binary_format_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        fs::write(&path, b"PK\x03\x04").unwrap();
        let err = ConverterRegistry::default().load(&path).unwrap_err();
        assert!(matches!(err, ConvertError::ExtractorUnavailable { .. }));
    }

    #[test]
    fn later_registration_wins() {
        struct Upper;
        impl Converter for Upper {
            fn kind(&self) -> SourceKind {
                SourceKind::Structured
            }
            fn extensions(&self) -> &[&str] {
                &["txt"]
            }
            fn convert(&self, path: &Path) -> ConvertResult<NormalizedDocument> {
                let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(NormalizedDocument::from_text(text.to_uppercase(), Default::default()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hi").unwrap();
        let mut registry = ConverterRegistry::default();
        registry.register(Upper);
        assert_eq!(registry.load(&path).unwrap().items, vec!["HI"]);
    }
}
