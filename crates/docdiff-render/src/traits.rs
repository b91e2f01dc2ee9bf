use std::io::Write;

use docdiff_engine::DiffResult;

use crate::error::RenderResult;
use crate::format::OutputFormat;

/// Turns a diff result into one presentation.
///
/// Renderers read the result and its documents; they never modify them.
pub trait Renderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> OutputFormat;

    /// Render to a string. Binary formats return
    /// [`RenderError::BinaryOutput`](crate::RenderError::BinaryOutput).
    fn render(&self, result: &DiffResult) -> RenderResult<String>;

    /// Render to raw bytes. Text formats return their UTF-8 encoding.
    fn render_bytes(&self, result: &DiffResult) -> RenderResult<Vec<u8>> {
        self.render(result).map(String::into_bytes)
    }

    /// Render into a writer.
    fn render_to(&self, result: &DiffResult, out: &mut dyn Write) -> RenderResult<()> {
        out.write_all(&self.render_bytes(result)?)?;
        Ok(())
    }
}
