//! Structured JSON record of a diff.

use std::path::Path;

use serde::ser::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use docdiff_engine::{DiffResult, DiffStats, Hunk};
use docdiff_types::{NormalizedDocument, PositionalBlock, SourceKind};

use crate::error::{RenderError, RenderResult};
use crate::format::OutputFormat;
use crate::traits::Renderer;

#[derive(Clone, Debug)]
pub struct JsonRenderer {
    indent: usize,
    include_full_text: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new(2, false)
    }
}

impl JsonRenderer {
    pub fn new(indent: usize, include_full_text: bool) -> Self {
        Self {
            indent,
            include_full_text,
        }
    }

    fn record<'a>(&self, result: &'a DiffResult) -> Record<'a> {
        let file = |doc: &'a NormalizedDocument| FileRecord {
            path: doc.source.path.as_deref(),
            kind: doc.source.kind,
            page_count: doc.page_count,
            full_text: self.include_full_text.then_some(doc.full_text.as_str()),
        };
        Record {
            summary: Summary {
                similarity_ratio: result.similarity_ratio,
                has_changes: result.has_changes(),
                stats: &result.stats,
            },
            files: Files {
                old: file(result.old_doc()),
                new: file(result.new_doc()),
            },
            hunks: result.hunks.iter().map(HunkRecord::from).collect(),
            changes_only: result.changes_only().map(HunkRecord::from).collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct Record<'a> {
    summary: Summary<'a>,
    files: Files<'a>,
    hunks: Vec<HunkRecord<'a>>,
    changes_only: Vec<HunkRecord<'a>>,
}

#[derive(serde::Serialize)]
struct Summary<'a> {
    similarity_ratio: f64,
    has_changes: bool,
    stats: &'a DiffStats,
}

#[derive(serde::Serialize)]
struct Files<'a> {
    old: FileRecord<'a>,
    new: FileRecord<'a>,
}

#[derive(serde::Serialize)]
struct FileRecord<'a> {
    path: Option<&'a Path>,
    #[serde(rename = "type")]
    kind: SourceKind,
    page_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_text: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct HunkRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    old_text: &'a str,
    new_text: &'a str,
    old_range: [usize; 2],
    new_range: [usize; 2],
    old_blocks: &'a [PositionalBlock],
    new_blocks: &'a [PositionalBlock],
}

impl<'a> From<&'a Hunk> for HunkRecord<'a> {
    fn from(hunk: &'a Hunk) -> Self {
        Self {
            kind: hunk.kind().as_str(),
            old_text: &hunk.old_text,
            new_text: &hunk.new_text,
            old_range: [hunk.op.old_range.start, hunk.op.old_range.end],
            new_range: [hunk.op.new_range.start, hunk.op.new_range.end],
            old_blocks: &hunk.old_blocks,
            new_blocks: &hunk.new_blocks,
        }
    }
}

impl Renderer for JsonRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let record = self.record(result);
        if self.indent == 0 {
            return Ok(serde_json::to_string(&record)?);
        }

        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        record.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| RenderError::Serialization(e.to_string()))
    }
}
