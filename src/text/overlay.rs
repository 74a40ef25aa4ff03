use std::path::Path;

use crate::foundation::core::{Affine, Canvas, Rgba8};
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;
use crate::text::engine::{TextBrush, TextLayoutEngine};
use crate::text::measure::TextMeasure;
use crate::text::wrap::wrap_words;

/// Caption styling, expressed relative to the surface width so overlays keep their
/// proportions across export resolutions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Font size as a fraction of surface width.
    pub font_scale: f32,
    /// Line pitch as a fraction of surface width.
    pub line_height_scale: f32,
    /// Side and bottom padding as a fraction of surface width.
    pub padding_scale: f32,
    /// Outline width in pixels at `stroke_reference_width_px`.
    pub stroke_width_px: f32,
    /// Surface width at which `stroke_width_px` applies unscaled.
    pub stroke_reference_width_px: f32,
    /// Outline color (straight alpha).
    pub stroke_rgba: Rgba8,
    /// Fill color (straight alpha).
    pub fill_rgba: Rgba8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_scale: 0.07,
            line_height_scale: 0.08,
            padding_scale: 0.05,
            stroke_width_px: 6.0,
            stroke_reference_width_px: 1080.0,
            stroke_rgba: Rgba8::new(0, 0, 0, 179),
            fill_rgba: Rgba8::WHITE,
        }
    }
}

impl OverlayStyle {
    /// Reject non-finite or out-of-range style values.
    pub fn validate(&self) -> AdcompResult<()> {
        let positive = [
            ("font_scale", self.font_scale),
            ("line_height_scale", self.line_height_scale),
            ("stroke_reference_width_px", self.stroke_reference_width_px),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(AdcompError::validation(format!(
                    "overlay {name} must be finite and > 0"
                )));
            }
        }
        if !self.padding_scale.is_finite() || !(0.0..0.5).contains(&self.padding_scale) {
            return Err(AdcompError::validation(
                "overlay padding_scale must be in [0, 0.5)",
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px < 0.0 {
            return Err(AdcompError::validation(
                "overlay stroke_width_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Pixel metrics for a surface `width` pixels wide.
    pub fn metrics(&self, width: u32) -> OverlayMetrics {
        let w = width as f32;
        let padding_px = w * self.padding_scale;
        OverlayMetrics {
            font_size_px: w * self.font_scale,
            line_height_px: w * self.line_height_scale,
            padding_px,
            max_line_width_px: w - 2.0 * padding_px,
            stroke_width_px: self.stroke_width_px * w / self.stroke_reference_width_px,
        }
    }
}

/// Resolved pixel metrics for one surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayMetrics {
    pub font_size_px: f32,
    pub line_height_px: f32,
    pub padding_px: f32,
    pub max_line_width_px: f32,
    pub stroke_width_px: f32,
}

/// One wrapped caption line, positioned on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    /// Measured width of the trimmed line.
    pub width_px: f32,
    /// Bottom edge of the line box; lines are centred horizontally.
    pub bottom_y: f32,
}

/// Wrapped, bottom-anchored caption layout.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayout {
    pub canvas: Canvas,
    pub metrics: OverlayMetrics,
    pub lines: Vec<OverlayLine>,
}

impl OverlayLayout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Height of the whole text block.
    pub fn block_height_px(&self) -> f32 {
        self.lines.len() as f32 * self.metrics.line_height_px
    }
}

/// Wrap `caption` for `canvas` and anchor the block to the bottom edge.
///
/// The first line's bottom sits at `H - padding - block_height + line_height`; each next line
/// is one line pitch lower, so the last line ends `padding` above the bottom edge.
pub fn layout_caption(
    caption: &str,
    canvas: Canvas,
    style: &OverlayStyle,
    measure: &mut dyn TextMeasure,
) -> OverlayLayout {
    let metrics = style.metrics(canvas.width);
    let wrapped = wrap_words(
        caption,
        metrics.max_line_width_px,
        metrics.font_size_px,
        measure,
    );

    let block_height = wrapped.len() as f32 * metrics.line_height_px;
    let first_bottom =
        canvas.height as f32 - metrics.padding_px - block_height + metrics.line_height_px;

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width_px = measure.measure(&text, metrics.font_size_px);
            OverlayLine {
                text,
                width_px,
                bottom_y: first_bottom + i as f32 * metrics.line_height_px,
            }
        })
        .collect();

    OverlayLayout {
        canvas,
        metrics,
        lines,
    }
}

/// Anything that can stamp a caption onto a surface.
pub trait CaptionOverlay {
    /// Draw `caption` onto `surface` and hand the surface back.
    fn apply(&mut self, surface: Surface, caption: &str) -> AdcompResult<Surface>;
}

/// Overlay that leaves surfaces untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverlay;

impl CaptionOverlay for NoOverlay {
    fn apply(&mut self, surface: Surface, _caption: &str) -> AdcompResult<Surface> {
        Ok(surface)
    }
}

/// Renders outlined, word-wrapped captions with `vello_cpu`.
#[derive(Debug)]
pub struct TextOverlayRenderer {
    engine: TextLayoutEngine,
    style: OverlayStyle,
}

#[derive(Clone, Copy)]
enum GlyphPass {
    Stroke,
    Fill,
}

impl TextOverlayRenderer {
    pub fn new(engine: TextLayoutEngine, style: OverlayStyle) -> AdcompResult<Self> {
        style.validate()?;
        Ok(Self { engine, style })
    }

    pub fn from_font_path(path: &Path, style: OverlayStyle) -> AdcompResult<Self> {
        Self::new(TextLayoutEngine::from_font_path(path)?, style)
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Layout only, using the renderer's font metrics.
    pub fn layout(&mut self, caption: &str, canvas: Canvas) -> OverlayLayout {
        layout_caption(caption, canvas, &self.style, &mut self.engine)
    }

    /// Burn `caption` into `surface`: outline every line first, then fill every line, so no
    /// outline lands on top of an earlier line's fill.
    #[tracing::instrument(skip(self, surface), fields(w = surface.width(), h = surface.height()))]
    pub fn render(&mut self, mut surface: Surface, caption: &str) -> AdcompResult<Surface> {
        let layout = self.layout(caption, surface.canvas());
        if layout.is_empty() {
            return Ok(surface);
        }

        let w: u16 = surface
            .width()
            .try_into()
            .map_err(|_| AdcompError::validation("overlay surface width exceeds u16"))?;
        let h: u16 = surface
            .height()
            .try_into()
            .map_err(|_| AdcompError::validation("overlay surface height exceeds u16"))?;

        let metrics = layout.metrics;
        let center_x = f64::from(surface.width()) / 2.0;
        let shaped: Vec<(parley::Layout<TextBrush>, Affine)> = layout
            .lines
            .iter()
            .map(|line| {
                let shaped = self.engine.layout_line(&line.text, metrics.font_size_px);
                let x = center_x - f64::from(line.width_px) / 2.0;
                let top = f64::from(line.bottom_y) - f64::from(shaped.height());
                (shaped, Affine::translate((x, top)))
            })
            .collect();
        tracing::debug!(lines = shaped.len(), font_px = metrics.font_size_px, "caption layout");

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let font = self.engine.font().clone();

        let stroke = self.style.stroke_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            stroke.r, stroke.g, stroke.b, stroke.a,
        ));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(
            metrics.stroke_width_px,
        )));
        if metrics.stroke_width_px > 0.0 {
            for (line, tr) in &shaped {
                ctx.set_transform(affine_to_cpu(*tr));
                draw_glyphs(&mut ctx, &font, line, GlyphPass::Stroke);
            }
        }

        let fill = self.style.fill_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            fill.r, fill.g, fill.b, fill.a,
        ));
        for (line, tr) in &shaped {
            ctx.set_transform(affine_to_cpu(*tr));
            draw_glyphs(&mut ctx, &font, line, GlyphPass::Fill);
        }

        // `vello_cpu` renders into a fresh buffer; blend it over the surface afterwards.
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        surface.composite_over(pixmap.data_as_u8_slice())?;
        Ok(surface)
    }
}

impl CaptionOverlay for TextOverlayRenderer {
    fn apply(&mut self, surface: Surface, caption: &str) -> AdcompResult<Surface> {
        self.render(surface, caption)
    }
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrush>,
    pass: GlyphPass,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(font).font_size(run.run().font_size());
            match pass {
                GlyphPass::Stroke => builder.stroke_glyphs(glyphs),
                GlyphPass::Fill => builder.fill_glyphs(glyphs),
            }
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/text/overlay.rs"]
mod tests;
