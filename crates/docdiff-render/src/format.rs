use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use docdiff_engine::DiffResult;

use crate::ansi::AnsiRenderer;
use crate::columns::ColumnsRenderer;
use crate::error::RenderResult;
use crate::html::HtmlRenderer;
use crate::json::JsonRenderer;
use crate::options::RenderOptions;
use crate::patch::{ContextRenderer, UnifiedRenderer};
use crate::png::PngRenderer;
use crate::traits::Renderer;

/// Every supported output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Inline markers for a terminal.
    #[default]
    #[serde(alias = "terminal")]
    Ansi,
    Html,
    Json,
    /// Side-by-side plain-text columns.
    Columns,
    /// Classic unified-diff text.
    Unified,
    /// Context-diff text.
    Context,
    /// Colored-band PNG image; binary, so file output only.
    Png,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 7] = [
        Self::Ansi,
        Self::Html,
        Self::Json,
        Self::Columns,
        Self::Unified,
        Self::Context,
        Self::Png,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ansi => "ansi",
            Self::Html => "html",
            Self::Json => "json",
            Self::Columns => "columns",
            Self::Unified => "unified",
            Self::Context => "context",
            Self::Png => "png",
        }
    }

    /// Conventional file extension for output in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ansi | Self::Columns => "txt",
            Self::Html => "html",
            Self::Json => "json",
            Self::Unified | Self::Context => "diff",
            Self::Png => "png",
        }
    }

    /// Whether the output is bytes rather than text.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Png)
    }

    /// Build the renderer for this format.
    pub fn renderer(&self, options: &RenderOptions) -> Box<dyn Renderer> {
        match self {
            Self::Ansi => Box::new(AnsiRenderer::new(options.color, options.context)),
            Self::Html => Box::new(HtmlRenderer::new(options.context)),
            Self::Json => Box::new(JsonRenderer::new(options.indent, options.include_full_text)),
            Self::Columns => Box::new(ColumnsRenderer::new(options.column_width)),
            Self::Unified => Box::new(UnifiedRenderer::new(options.context)),
            Self::Context => Box::new(ContextRenderer::new(options.context)),
            Self::Png => Box::new(PngRenderer::new()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "terminal" => Ok(Self::Ansi),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "columns" => Ok(Self::Columns),
            "unified" => Ok(Self::Unified),
            "context" => Ok(Self::Context),
            "png" => Ok(Self::Png),
            other => Err(format!(
                "unknown output format '{other}' (expected one of: ansi, terminal, html, json, columns, unified, context, png)"
            )),
        }
    }
}

/// Render `result` in `format`.
pub fn render(format: OutputFormat, result: &DiffResult, options: &RenderOptions) -> RenderResult<String> {
    let output = format.renderer(options).render(result)?;
    debug!(%format, bytes = output.len(), hunks = result.hunks.len(), "rendered");
    Ok(output)
}

/// Render `result` in `format` as bytes. The only way to get binary formats.
pub fn render_bytes(format: OutputFormat, result: &DiffResult, options: &RenderOptions) -> RenderResult<Vec<u8>> {
    let output = format.renderer(options).render_bytes(result)?;
    debug!(%format, bytes = output.len(), hunks = result.hunks.len(), "rendered");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
            assert_eq!(format.renderer(&RenderOptions::default()).format(), format);
        }
        assert_eq!("terminal".parse::<OutputFormat>().unwrap(), OutputFormat::Ansi);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn only_png_is_binary() {
        let result = crate::fixtures::sample();
        let options = RenderOptions::default();
        for format in OutputFormat::ALL {
            assert_eq!(format.is_binary(), format == OutputFormat::Png);
            let bytes = render_bytes(format, &result, &options).unwrap();
            assert!(!bytes.is_empty(), "{format}");
            if !format.is_binary() {
                assert_eq!(bytes, render(format, &result, &options).unwrap().into_bytes());
            }
        }
        assert!(render(OutputFormat::Png, &result, &options).is_err());
        assert_eq!(OutputFormat::Context.extension(), "diff");
    }

    #[test]
    fn serde_alias() {
        let f: OutputFormat = serde_json::from_str("\"terminal\"").unwrap();
        assert_eq!(f, OutputFormat::Ansi);
        assert_eq!(serde_json::to_string(&OutputFormat::Columns).unwrap(), "\"columns\"");
    }
}
