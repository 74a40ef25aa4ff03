use crate::assets::source::ImageSource;
use crate::foundation::core::GridSpec;
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;
use crate::text::overlay::CaptionOverlay;

/// Ordered frames cut from one sprite sheet.
///
/// All frames are `frame_width x frame_height`: the cell size is computed once from the sheet
/// and every cell is cut at that size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlicedSpriteSheet {
    /// Frames in row-major order (top-left first, bottom-right last).
    pub frames: Vec<Surface>,
    /// Width of every frame in pixels.
    pub frame_width: u32,
    /// Height of every frame in pixels.
    pub frame_height: u32,
}

/// Pixel rectangle of one grid cell within the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cuts sprite sheets into frame sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteSheetSlicer {
    grid: GridSpec,
}

impl SpriteSheetSlicer {
    pub fn new(grid: GridSpec) -> AdcompResult<Self> {
        grid.validate()?;
        Ok(Self { grid })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Load `source`, then slice it and stamp `caption` onto every frame.
    #[tracing::instrument(skip(self, source, overlay), fields(rows = self.grid.rows, cols = self.grid.cols))]
    pub fn slice(
        &self,
        source: &ImageSource,
        caption: &str,
        overlay: &mut dyn CaptionOverlay,
    ) -> AdcompResult<SlicedSpriteSheet> {
        let sheet = source.load()?;
        self.slice_surface(&sheet, caption, overlay)
    }

    /// Slice an already decoded sheet. The sheet itself is left untouched.
    pub fn slice_surface(
        &self,
        sheet: &Surface,
        caption: &str,
        overlay: &mut dyn CaptionOverlay,
    ) -> AdcompResult<SlicedSpriteSheet> {
        self.slice_with(sheet, caption, overlay, &mut |sheet: &Surface, cell: CellRect| {
            sheet.crop(cell.x, cell.y, cell.width, cell.height)
        })
    }

    /// Slice `sheet`, cutting each cell with `extract`. A cell for which `extract` yields
    /// `None` is skipped; the count check then reports the shortfall.
    pub(crate) fn slice_with(
        &self,
        sheet: &Surface,
        caption: &str,
        overlay: &mut dyn CaptionOverlay,
        extract: &mut dyn FnMut(&Surface, CellRect) -> Option<Surface>,
    ) -> AdcompResult<SlicedSpriteSheet> {
        let (width, height) = (sheet.width(), sheet.height());
        if width == 0 || height == 0 {
            return Err(AdcompError::degenerate(format!(
                "sprite sheet has zero dimensions ({width}x{height})"
            )));
        }

        let (frame_width, frame_height) = self.grid.cell_size(width, height);
        if frame_width == 0 || frame_height == 0 {
            return Err(AdcompError::degenerate(format!(
                "sprite sheet {width}x{height} is too small for a {}x{} grid",
                self.grid.rows, self.grid.cols
            )));
        }

        let expected = self.grid.cell_count();
        let mut frames = Vec::with_capacity(expected);
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let rect = CellRect {
                    x: col * frame_width,
                    y: row * frame_height,
                    width: frame_width,
                    height: frame_height,
                };
                let Some(cell) = extract(sheet, rect) else {
                    tracing::warn!(row, col, "could not extract sprite cell");
                    continue;
                };
                frames.push(overlay.apply(cell, caption)?);
            }
        }

        if frames.len() != expected {
            return Err(AdcompError::incomplete(expected, frames.len()));
        }
        tracing::debug!(
            frames = frames.len(),
            frame_width,
            frame_height,
            "sliced sprite sheet"
        );

        Ok(SlicedSpriteSheet {
            frames,
            frame_width,
            frame_height,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/slicer.rs"]
mod tests;
