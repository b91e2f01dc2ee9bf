//! Plain text, source code, and markup files.

use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use docdiff_types::{
    split_lines, NormalizedDocument, PositionalBlock, SourceInfo, SourceKind, DEFAULT_LINE_HEIGHT,
};

use crate::error::{ConvertError, ConvertResult};
use crate::traits::{extension_of, Converter};

/// Nominal glyph width used for a line's block width.
const CHAR_WIDTH: f64 = 7.0;

const EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "json", "xml", "html", "css", "js", "py", "java", "c", "cpp",
    "h", "hpp", "go", "rs", "rb", "php", "sh", "bash", "yaml", "yml", "toml", "ini", "conf", "cfg",
    "log", "csv", "tsv",
];

/// Reads a text file into one line item and one positional block per line.
///
/// Blocks carry an explicit `line_number`, so hunk attachment never depends
/// on the line pitch for text input.
#[derive(Clone, Debug)]
pub struct TextConverter {
    line_height: f64,
}

impl Default for TextConverter {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_HEIGHT)
    }
}

impl TextConverter {
    pub fn new(line_height: f64) -> Self {
        Self { line_height }
    }

    /// Build a document from already-decoded text.
    pub fn from_text(&self, text: String, source: SourceInfo) -> NormalizedDocument {
        let items = split_lines(&text);
        let positional_blocks = items
            .iter()
            .enumerate()
            .map(|(i, line)| {
                PositionalBlock::new(line.as_str())
                    .at(0, 0.0, i as f64 * self.line_height)
                    .with_size(line.chars().count() as f64 * CHAR_WIDTH, self.line_height)
                    .with_line_number(i + 1)
            })
            .collect();
        let extension = source
            .path
            .as_deref()
            .and_then(extension_of)
            .unwrap_or_default();
        let line_count = items.len();
        let char_count = text.chars().count();

        NormalizedDocument {
            items,
            full_text: text,
            positional_blocks,
            page_count: 1,
            source,
            metadata: BTreeMap::new(),
        }
        .with_metadata("line_count", line_count)
        .with_metadata("char_count", char_count)
        .with_metadata("extension", extension)
    }
}

impl Converter for TextConverter {
    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn convert(&self, path: &Path) -> ConvertResult<NormalizedDocument> {
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConvertError::NotFound(path.to_path_buf()),
            _ => ConvertError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let (text, encoding) = decode(&bytes);
        if encoding == Encoding::Windows1252 {
            warn!(path = %path.display(), "input is not valid UTF-8 or UTF-16, decoded as Windows-1252");
        }
        debug!(path = %path.display(), ?encoding, bytes = bytes.len(), "decoded text file");

        Ok(self.from_text(text, SourceInfo::new(path, SourceKind::Text)))
    }
}

/// Which decoding succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    /// Legacy single-byte fallback.
    Windows1252,
}

/// Decode bytes by their byte-order mark (UTF-8 when there is none), falling
/// back to Windows-1252 when that fails.
///
/// Windows-1252 maps every byte to a character, so decoding never fails and
/// no byte is dropped. A leading byte-order mark is removed.
pub fn decode(bytes: &[u8]) -> (String, Encoding) {
    let (encoding, bom_len) = encoding_rs::Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..]) {
        let detected = if encoding == UTF_16LE {
            Encoding::Utf16Le
        } else if encoding == UTF_16BE {
            Encoding::Utf16Be
        } else {
            Encoding::Utf8
        };
        return (text.into_owned(), detected);
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text.into_owned(), Encoding::Windows1252)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdiff_types::MetadataValue;
    use std::fs;

    #[test]
    fn converts_lines_with_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        fs::write(&path, "first\n\nthird line\n").unwrap();

        let doc = TextConverter::default().convert(&path).unwrap();
        assert_eq!(doc.items, vec!["first", "", "third line"]);
        assert_eq!(doc.full_text, "first\n\nthird line\n");
        assert_eq!(doc.positional_blocks.len(), 3);

        let third = &doc.positional_blocks[2];
        assert_eq!(third.line_number(), Some(3));
        assert_eq!(third.y, 24.0);
        assert_eq!(third.width, 70.0);
        assert_eq!(third.height, 12.0);

        assert_eq!(doc.metadata["line_count"], MetadataValue::Int(3));
        assert_eq!(doc.metadata["char_count"], MetadataValue::Int(18));
        assert_eq!(doc.metadata["extension"], MetadataValue::from("txt"));
        assert_eq!(doc.source.kind, SourceKind::Text);
        assert_eq!(doc.display_name("old"), "notes.TXT");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn custom_pitch() {
        let doc = TextConverter::new(20.0).from_text("a\nb".to_string(), SourceInfo::default());
        assert_eq!(doc.positional_blocks[1].y, 20.0);
        assert_eq!(doc.positional_blocks[1].height, 20.0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextConverter::default()
            .convert(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, enc) = decode(b"\xEF\xBB\xBFhello");
        assert_eq!(text, "hello");
        assert_eq!(enc, Encoding::Utf8);
    }

    #[test]
    fn utf16_with_bom() {
        let mut le = vec![0xFF, 0xFE];
        le.extend("hé\n".encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(decode(&le), ("hé\n".to_string(), Encoding::Utf16Le));

        let mut be = vec![0xFE, 0xFF];
        be.extend("ok".encode_utf16().flat_map(u16::to_be_bytes));
        assert_eq!(decode(&be), ("ok".to_string(), Encoding::Utf16Be));
    }

    #[test]
    fn legacy_fallback_keeps_every_byte() {
        let (text, enc) = decode(b"caf\xE9");
        assert_eq!(text, "café");
        assert_eq!(enc, Encoding::Windows1252);

        let (text, _) = decode(b"\x93quoted\x94 \x81");
        assert_eq!(text, "\u{201c}quoted\u{201d} \u{81}");
        assert_eq!(text.chars().count(), 10);
    }

    #[test]
    fn broken_utf16_falls_back() {
        let (text, enc) = decode(&[0xFF, 0xFE, 0x41]);
        assert_eq!(enc, Encoding::Windows1252);
        assert_eq!(text, "\u{ff}\u{fe}A");
    }

    #[test]
    fn undecodable_file_still_converts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        fs::write(&path, b"na\xEFve\nsecond\n").unwrap();
        let doc = TextConverter::default().convert(&path).unwrap();
        assert_eq!(doc.items, vec!["naïve", "second"]);
    }

    #[test]
    fn handles_common_extensions() {
        let conv = TextConverter::default();
        assert!(conv.can_convert(Path::new("main.rs")));
        assert!(conv.can_convert(Path::new("README.MD")));
        assert!(!conv.can_convert(Path::new("report.pdf")));
    }
}
