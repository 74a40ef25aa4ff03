use std::path::Path;

use anyhow::Context;

use crate::assets::source::{ImageSource, to_data_uri};
use crate::encode::assembler::{AnimatedAsset, AnimationEncoder};
use crate::foundation::core::{AnimationTiming, AspectRatio, GridSpec};
use crate::foundation::error::AdcompResult;
use crate::sprite::slicer::SpriteSheetSlicer;
use crate::text::overlay::CaptionOverlay;

pub const PNG_MIME: &str = "image/png";
/// File name used for still exports when the caller does not pick one.
pub const DEFAULT_STILL_FILE_NAME: &str = "ai-social-ad.png";
/// File name used for animations when the caller does not pick one.
pub const DEFAULT_ANIMATION_FILE_NAME: &str = "ai-animated-ad.gif";

/// A composited still, encoded as PNG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    pub fn to_data_uri(&self) -> String {
        to_data_uri(PNG_MIME, &self.png)
    }

    pub fn write_to(&self, path: &Path) -> AdcompResult<()> {
        std::fs::write(path, &self.png)
            .with_context(|| format!("write image to '{}'", path.display()))?;
        Ok(())
    }
}

/// Scale `source` onto the `aspect` canvas, burn in `caption` and encode the result as PNG.
#[tracing::instrument(skip(source, caption, overlay), fields(aspect = aspect.as_str()))]
pub fn export_still(
    source: &ImageSource,
    caption: &str,
    aspect: AspectRatio,
    overlay: &mut dyn CaptionOverlay,
) -> AdcompResult<ExportedImage> {
    let canvas = aspect.canvas();
    let image = source.load()?;
    let scaled = image.scaled_to(canvas)?;
    let composed = overlay.apply(scaled, caption)?;
    let png = composed.encode_png()?;
    tracing::debug!(bytes = png.len(), "still exported");

    Ok(ExportedImage {
        png,
        width: canvas.width,
        height: canvas.height,
    })
}

/// Slice `sheet` into `grid` frames with `caption` on each, then hand them to `encoder`.
///
/// The encoder only runs once slicing has fully succeeded.
#[tracing::instrument(
    skip(sheet, caption, overlay, encoder),
    fields(rows = grid.rows, cols = grid.cols, frame_ms = timing.frame_duration_ms)
)]
pub fn animate_sprite_sheet(
    sheet: &ImageSource,
    caption: &str,
    grid: GridSpec,
    timing: AnimationTiming,
    overlay: &mut dyn CaptionOverlay,
    encoder: &dyn AnimationEncoder,
) -> AdcompResult<AnimatedAsset> {
    let slicer = SpriteSheetSlicer::new(grid)?;
    let sliced = slicer.slice(sheet, caption, overlay)?;
    encoder.encode(
        sliced.frames,
        sliced.frame_width,
        sliced.frame_height,
        timing,
    )
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
