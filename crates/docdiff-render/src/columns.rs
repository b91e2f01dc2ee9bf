//! Side-by-side plain-text columns built from the dual-pane rows.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use docdiff_engine::{project, DiffResult, PaneRow, RowKind};

use crate::error::RenderResult;
use crate::format::OutputFormat;
use crate::traits::Renderer;
use crate::{labels, percent};

const SEPARATOR: &str = " │ ";
/// Line number column plus marker: `"1234 - "`.
const GUTTER: usize = 7;

#[derive(Clone, Debug)]
pub struct ColumnsRenderer {
    column_width: usize,
}

impl Default for ColumnsRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl ColumnsRenderer {
    pub fn new(column_width: usize) -> Self {
        Self {
            column_width: column_width.max(GUTTER + 4),
        }
    }

    fn cell(&self, row: &PaneRow<'_>, side_marker: char) -> String {
        let body = match row.line {
            None => String::new(),
            Some(line) => {
                let marker = match row.kind {
                    RowKind::Equal | RowKind::Pad => ' ',
                    RowKind::Delete | RowKind::Insert => side_marker,
                    RowKind::Replace => '~',
                };
                format!("{:4} {marker} {}", line.number, line.text)
            }
        };
        fit(&body, self.column_width)
    }
}

impl Renderer for ColumnsRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Columns
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let (old_name, new_name) = labels(result);
        let panes = project(result);
        let mut lines = Vec::with_capacity(panes.len() + 3);

        lines.push(format!(
            "{}{SEPARATOR}{}",
            fit(&old_name, self.column_width),
            fit(&new_name, self.column_width)
        ));
        lines.push(format!(
            "{}{}{}",
            "─".repeat(self.column_width),
            "─┼─",
            "─".repeat(self.column_width)
        ));
        for (old, new) in panes.old_rows.iter().zip(&panes.new_rows) {
            let row = format!("{}{SEPARATOR}{}", self.cell(old, '-'), self.cell(new, '+'));
            lines.push(row.trim_end().to_string());
        }
        let stats = &result.stats;
        lines.push(format!(
            "Similarity: {} | +{} -{} ~{}",
            percent(result.similarity_ratio),
            stats.insertions,
            stats.deletions,
            stats.modifications
        ));
        Ok(lines.join("\n"))
    }
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let text = text.replace('\t', "    ");
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{text}{}", " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn fit_pads_and_truncates_by_display_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("日本語", 5), "日本…");
        assert_eq!(fit("日本語", 6), "日本語");
        assert_eq!(fit("日本語テキスト", 6).width(), 6);
    }

    #[test]
    fn rows_are_synchronized() {
        let out = ColumnsRenderer::new(20).render(&fixtures::sample()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2 + 4 + 1);
        assert!(lines[0].starts_with("old.txt"));
        assert!(lines[0].contains("│ new.txt"));
        assert_eq!(lines[2], format!("{}{SEPARATOR}{}", fit("   1   line1", 20), "   1   line1"));
        assert_eq!(lines[3], format!("{}{SEPARATOR}{}", fit("   2 ~ line2", 20), "   2 ~ line2X"));
        assert_eq!(lines[5], format!("{}{SEPARATOR}{}", " ".repeat(20), "   4 + line4"));
        assert_eq!(lines[6], "Similarity: 57.1% | +1 -0 ~1");
    }
}
