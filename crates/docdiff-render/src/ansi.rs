//! Inline terminal output: one line per item, `-`/`+` markers, line numbers.

use colored::{ColoredString, Colorize};

use docdiff_engine::{project_unified, DiffResult, Origin, UnifiedRow};

use crate::error::RenderResult;
use crate::format::OutputFormat;
use crate::traits::Renderer;
use crate::{labels, percent};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Clone, Debug)]
pub struct AnsiRenderer {
    color: bool,
    context: Option<usize>,
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new(true, None)
    }
}

impl AnsiRenderer {
    pub fn new(color: bool, context: Option<usize>) -> Self {
        Self { color, context }
    }

    fn paint(&self, text: String, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(&text).to_string()
        } else {
            text
        }
    }

    fn header(&self, old_name: &str, new_name: &str) -> Vec<String> {
        vec![
            self.paint("━━━ docdiff ━━━".to_string(), |s| s.cyan().bold()),
            self.paint(format!("--- {old_name}"), |s| s.red()),
            self.paint(format!("+++ {new_name}"), |s| s.green()),
        ]
    }

    fn footer(&self, result: &DiffResult) -> Vec<String> {
        let stats = &result.stats;
        vec![
            self.paint(RULE.to_string(), |s| s.dimmed()),
            format!(
                "Similarity: {} | {} {} {}",
                self.paint(percent(result.similarity_ratio), |s| s.cyan()),
                self.paint(format!("+{}", stats.insertions), |s| s.green()),
                self.paint(format!("-{}", stats.deletions), |s| s.red()),
                self.paint(format!("~{}", stats.modifications), |s| s.yellow()),
            ),
        ]
    }
}

impl Renderer for AnsiRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Ansi
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let (old_name, new_name) = labels(result);
        let mut lines = self.header(&old_name, &new_name);
        lines.push(String::new());

        for row in project_unified(result, self.context) {
            let line = match row {
                UnifiedRow::Gap { skipped } => {
                    self.paint(format!("     ⋯ {skipped} unchanged"), |s| s.dimmed())
                }
                UnifiedRow::Line(line) => match line.origin {
                    Origin::Both => format!(
                        "{}   {}",
                        self.paint(format!("{:4}", line.old_number.unwrap_or_default()), |s| s.dimmed()),
                        line.text
                    ),
                    Origin::Old => self.paint(
                        format!("{:4} - {}", line.old_number.unwrap_or_default(), line.text),
                        |s| s.red(),
                    ),
                    Origin::New => self.paint(
                        format!("{:4} + {}", line.new_number.unwrap_or_default(), line.text),
                        |s| s.green(),
                    ),
                },
            };
            lines.push(line);
        }

        lines.push(String::new());
        lines.extend(self.footer(result));
        Ok(lines.join("\n"))
    }
}
