//! Renderers for docdiff results.
//!
//! Each [`OutputFormat`] maps to one [`Renderer`]. Renderers consume a
//! [`DiffResult`](docdiff_engine::DiffResult) or the engine's projections of
//! it and never re-derive alignment themselves.

pub mod ansi;
pub mod columns;
pub mod error;
pub mod format;
pub mod html;
pub mod json;
pub mod options;
pub mod patch;
pub mod png;
pub mod traits;

pub use ansi::AnsiRenderer;
pub use columns::ColumnsRenderer;
pub use error::{RenderError, RenderResult};
pub use format::{render, render_bytes, OutputFormat};
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use options::RenderOptions;
pub use patch::{ContextRenderer, UnifiedRenderer};
pub use png::PngRenderer;
pub use traits::Renderer;

use docdiff_engine::DiffResult;

/// Display names for the old and new documents.
pub(crate) fn labels(result: &DiffResult) -> (String, String) {
    (
        result.old_doc().display_name("old"),
        result.new_doc().display_name("new"),
    )
}

/// A ratio as a percentage with one decimal, e.g. `85.7%`.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(1.0), "100.0%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(6.0 / 7.0), "85.7%");
    }

    #[test]
    fn labels_use_file_names() {
        let result = fixtures::sample();
        assert_eq!(labels(&result), ("old.txt".to_string(), "new.txt".to_string()));
    }
}
