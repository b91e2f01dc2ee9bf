//! `diff -u` and `diff -c` text from the result's own edit script.

use docdiff_engine::patch::{context_text, unified_text};
use docdiff_engine::{DiffResult, Side};

use crate::error::RenderResult;
use crate::format::OutputFormat;
use crate::labels;
use crate::traits::Renderer;

const DEFAULT_CONTEXT: usize = 3;

/// Classic unified-diff text, as produced by `diff -u`.
#[derive(Clone, Debug, Default)]
pub struct UnifiedRenderer {
    context: Option<usize>,
}

impl UnifiedRenderer {
    pub fn new(context: Option<usize>) -> Self {
        Self { context }
    }
}

impl Renderer for UnifiedRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Unified
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let (old_label, new_label) = labels(result);
        Ok(unified_text(
            result.ops(),
            &result.items(Side::Old),
            &result.items(Side::New),
            &old_label,
            &new_label,
            self.context.unwrap_or(DEFAULT_CONTEXT),
        ))
    }
}

/// Context-diff text, as produced by `diff -c`.
#[derive(Clone, Debug, Default)]
pub struct ContextRenderer {
    context: Option<usize>,
}

impl ContextRenderer {
    pub fn new(context: Option<usize>) -> Self {
        Self { context }
    }
}

impl Renderer for ContextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Context
    }

    fn render(&self, result: &DiffResult) -> RenderResult<String> {
        let (old_label, new_label) = labels(result);
        Ok(context_text(
            result.ops(),
            &result.items(Side::Old),
            &result.items(Side::New),
            &old_label,
            &new_label,
            self.context.unwrap_or(DEFAULT_CONTEXT),
        ))
    }
}
