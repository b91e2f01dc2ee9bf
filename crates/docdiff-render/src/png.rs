//! Raster overview of a diff: one colored band per dual-pane row.
//!
//! Each pane cell is filled with its row kind's color, and a darker bar
//! proportional to the line's width sketches the text. The output is PNG
//! bytes, so it is only available through [`Renderer::render_bytes`].

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use docdiff_engine::{project, DiffResult, PaneRow, RowKind};

use crate::error::{RenderError, RenderResult};
use crate::format::OutputFormat;
use crate::traits::Renderer;

/// Pixel height of one row.
pub const ROW_PITCH: u32 = 12;
/// Pixel width of one pane.
pub const PANE_WIDTH: u32 = 400;
const GUTTER: u32 = 4;
const MARGIN: u32 = 6;
const CHAR_WIDTH: u32 = 4;
const BAR_INSET: u32 = 3;

const GUTTER_COLOR: Rgb<u8> = Rgb([160, 160, 160]);

/// Background color of a pane cell.
pub fn band_color(kind: RowKind) -> Rgb<u8> {
    match kind {
        RowKind::Equal => Rgb([255, 255, 255]),
        RowKind::Delete => Rgb([255, 215, 215]),
        RowKind::Insert => Rgb([215, 255, 215]),
        RowKind::Replace => Rgb([255, 242, 190]),
        RowKind::Pad => Rgb([230, 230, 230]),
    }
}

fn bar_color(kind: RowKind) -> Rgb<u8> {
    let Rgb([r, g, b]) = band_color(kind);
    Rgb([r / 2, g / 2, b / 2])
}

/// Colored-band PNG of the dual-pane projection.
#[derive(Clone, Debug, Default)]
pub struct PngRenderer;

impl PngRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the image without encoding it. An empty diff still gets one
    /// blank row so the image has a valid size.
    pub fn draw(&self, result: &DiffResult) -> RenderResult<RgbImage> {
        let panes = project(result);
        let rows = u32::try_from(panes.len().max(1))
            .ok()
            .and_then(|rows| rows.checked_mul(ROW_PITCH))
            .ok_or_else(|| RenderError::Image(format!("{} rows do not fit in one image", panes.len())))?;

        let width = 2 * PANE_WIDTH + GUTTER;
        let mut img = RgbImage::from_pixel(width, rows, band_color(RowKind::Equal));
        for y in 0..rows {
            for x in PANE_WIDTH..PANE_WIDTH + GUTTER {
                img.put_pixel(x, y, GUTTER_COLOR);
            }
        }

        let columns = [(0, &panes.old_rows), (PANE_WIDTH + GUTTER, &panes.new_rows)];
        for (x0, pane) in columns {
            for (index, row) in pane.iter().enumerate() {
                // `index < panes.len()`, which fit in a u32 above.
                let top = index as u32 * ROW_PITCH;
                fill_cell(&mut img, x0, top, row);
            }
        }
        Ok(img)
    }
}

fn fill_cell(img: &mut RgbImage, x0: u32, top: u32, row: &PaneRow<'_>) {
    let band = band_color(row.kind);
    for y in top..top + ROW_PITCH {
        for x in x0..x0 + PANE_WIDTH {
            img.put_pixel(x, y, band);
        }
    }

    let Some(text) = row.text() else { return };
    let chars = u32::try_from(text.trim_end().width()).unwrap_or(u32::MAX);
    let bar = chars.saturating_mul(CHAR_WIDTH).min(PANE_WIDTH - 2 * MARGIN);
    let color = bar_color(row.kind);
    for y in top + BAR_INSET..top + ROW_PITCH - BAR_INSET {
        for x in x0 + MARGIN..x0 + MARGIN + bar {
            img.put_pixel(x, y, color);
        }
    }
}

impl Renderer for PngRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn render(&self, _result: &DiffResult) -> RenderResult<String> {
        Err(RenderError::BinaryOutput(OutputFormat::Png))
    }

    fn render_bytes(&self, result: &DiffResult) -> RenderResult<Vec<u8>> {
        let img = self.draw(result)?;
        let (width, height) = img.dimensions();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        debug!(width, height, bytes = bytes.len(), "encoded png");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn decode(bytes: &[u8]) -> RgbImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8()
    }

    #[test]
    fn one_band_per_row() {
        let result = fixtures::sample();
        let rows = project(&result).len() as u32;
        let img = decode(&PngRenderer::new().render_bytes(&result).unwrap());

        assert_eq!(rows, 4);
        assert_eq!(img.height(), rows * ROW_PITCH);
        assert_eq!(img.width(), 2 * PANE_WIDTH + GUTTER);
    }

    #[test]
    fn bands_follow_row_kinds() {
        let img = decode(&PngRenderer::new().render_bytes(&fixtures::sample()).unwrap());
        let mid = ROW_PITCH / 2;
        let right = PANE_WIDTH + GUTTER;

        // Row 3 inserts `line4`: padded on the old side.
        assert_eq!(*img.get_pixel(PANE_WIDTH - 1, 3 * ROW_PITCH + mid), band_color(RowKind::Pad));
        assert_eq!(*img.get_pixel(right + PANE_WIDTH - 1, 3 * ROW_PITCH + mid), band_color(RowKind::Insert));
        assert_eq!(*img.get_pixel(PANE_WIDTH - 1, ROW_PITCH + mid), band_color(RowKind::Replace));
        assert_eq!(*img.get_pixel(PANE_WIDTH - 1, mid), band_color(RowKind::Equal));
        assert_eq!(*img.get_pixel(MARGIN, mid), bar_color(RowKind::Equal));
        assert_eq!(*img.get_pixel(PANE_WIDTH, mid), GUTTER_COLOR);
    }

    #[test]
    fn empty_diff_still_encodes() {
        let result = docdiff_engine::DiffEngine::default()
            .diff(fixtures::doc("a.txt", ""), fixtures::doc("b.txt", ""))
            .unwrap();
        let img = decode(&PngRenderer::new().render_bytes(&result).unwrap());
        assert_eq!(img.height(), ROW_PITCH);
    }

    #[test]
    fn text_rendering_is_refused() {
        let err = PngRenderer::new().render(&fixtures::sample()).unwrap_err();
        assert!(matches!(err, RenderError::BinaryOutput(OutputFormat::Png)));
        assert!(err.to_string().contains("--output"));
    }
}
