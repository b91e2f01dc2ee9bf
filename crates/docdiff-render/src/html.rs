//! HTML markup with a split view and a unified view.
//!
//! Only structure and class names are emitted; styling is left to the page
//! that embeds the output.

use std::fmt::Write as _;

use html_escape::encode_text;

use docdiff_engine::{project, project_unified, DiffResult, Origin, PaneRow, RowKind, UnifiedRow};

use crate::error::RenderResult;
use crate::format::OutputFormat;
use crate::traits::Renderer;
use crate::{labels, percent};

#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    context: Option<usize>,
}

impl HtmlRenderer {
    pub fn new(context: Option<usize>) -> Self {
        Self { context }
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let (old_name, new_name) = labels(result);
        let (old_name, new_name) = (encode_text(&old_name), encode_text(&new_name));
        let stats = &result.stats;
        let panes = project(result);

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
        let _ = writeln!(html, "<title>Diff: {old_name} vs {new_name}</title>");
        html.push_str("</head>\n<body>\n<div class=\"header\">\n<h1>docdiff</h1>\n");
        let _ = writeln!(
            html,
            "<div class=\"stats\">Similarity: {} | <span class=\"add\">+{}</span> <span class=\"del\">-{}</span> <span class=\"mod\">~{}</span></div>",
            percent(result.similarity_ratio),
            stats.insertions,
            stats.deletions,
            stats.modifications
        );
        html.push_str("</div>\n<div class=\"container split\">\n");
        pane(&mut html, "old", &format!("- {old_name}"), &panes.old_rows);
        pane(&mut html, "new", &format!("+ {new_name}"), &panes.new_rows);
        html.push_str("</div>\n<div class=\"container unified\">\n<div class=\"panel\">\n");
        html.push_str("<div class=\"panel-header\">Unified View</div>\n<div class=\"content\">\n");
        for row in project_unified(result, self.context) {
            match row {
                UnifiedRow::Gap { skipped } => {
                    let _ = writeln!(html, "<div class=\"line gap\"><span class=\"line-text\">{skipped} unchanged lines</span></div>");
                }
                UnifiedRow::Line(line) => {
                    let (class, number) = match line.origin {
                        Origin::Both => ("equal", line.old_number.unwrap_or_default().to_string()),
                        Origin::Old => ("delete", format!("-{}", line.old_number.unwrap_or_default())),
                        Origin::New => ("insert", format!("+{}", line.new_number.unwrap_or_default())),
                    };
                    line_div(&mut html, class, &number, line.text);
                }
            }
        }
        html.push_str("</div>\n</div>\n</div>\n</body>\n</html>\n");
        Ok(html)
    }
}

fn pane(html: &mut String, side: &str, title: &str, rows: &[PaneRow<'_>]) {
    let _ = writeln!(html, "<div class=\"panel\">\n<div class=\"panel-header {side}\">{title}</div>");
    let _ = writeln!(html, "<div class=\"content\" id=\"{side}-content\">");
    for row in rows {
        let class = match row.kind {
            RowKind::Pad => "empty",
            RowKind::Replace => "modify",
            other => other.as_str(),
        };
        let number = row.number().map(|n| n.to_string()).unwrap_or_default();
        line_div(html, class, &number, row.text().unwrap_or_default());
    }
    html.push_str("</div>\n</div>\n");
}

fn line_div(html: &mut String, class: &str, number: &str, text: &str) {
    let text = if text.is_empty() {
        "&nbsp;".into()
    } else {
        encode_text(text)
    };
    let _ = writeln!(
        html,
        "<div class=\"line {class}\"><span class=\"line-num\">{number}</span><span class=\"line-text\">{text}</span></div>"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use docdiff_engine::DiffEngine;

    #[test]
    fn split_panes_are_padded() {
        let html = HtmlRenderer::default().render(&fixtures::sample()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Diff: old.txt vs new.txt</title>"));
        assert!(html.contains(
            "<div class=\"line modify\"><span class=\"line-num\">2</span><span class=\"line-text\">line2X</span></div>"
        ));
        assert!(html.contains(
            "<div class=\"line empty\"><span class=\"line-num\"></span><span class=\"line-text\">&nbsp;</span></div>"
        ));
        assert!(html.contains("<span class=\"line-num\">+4</span><span class=\"line-text\">line4</span>"));
        assert!(html.contains("Similarity: 57.1%"));
    }

    #[test]
    fn content_is_escaped() {
        let result = DiffEngine::default()
            .diff(
                fixtures::doc("a.html", "<b>bold</b>"),
                fixtures::doc("b.html", "<i>it & more</i>"),
            )
            .unwrap();
        let html = HtmlRenderer::default().render(&result).unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("&lt;i&gt;it &amp; more&lt;/i&gt;"));
        assert!(!html.contains("<b>bold"));
    }

    #[test]
    fn unified_view_windows_context() {
        let result = DiffEngine::default()
            .diff(
                fixtures::doc("a.txt", "1\n2\n3\n4\n5\nx"),
                fixtures::doc("b.txt", "1\n2\n3\n4\n5\ny"),
            )
            .unwrap();
        let html = HtmlRenderer::new(Some(0)).render(&result).unwrap();
        assert!(html.contains("5 unchanged lines"));
    }
}
