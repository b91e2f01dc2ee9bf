use serde::{Deserialize, Serialize};

/// Presentation settings shared by all renderers.
///
/// Each renderer reads only the fields that concern it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Emit ANSI color escapes (terminal output only).
    pub color: bool,
    /// Unchanged lines kept around each change; `None` shows every line.
    pub context: Option<usize>,
    /// JSON indentation in spaces; `0` writes compact JSON.
    pub indent: usize,
    /// Include both documents' full text in JSON output.
    pub include_full_text: bool,
    /// Display width of each pane in column output.
    pub column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            context: None,
            indent: 2,
            include_full_text: false,
            column_width: 60,
        }
    }
}
