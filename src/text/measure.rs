/// Horizontal text metrics used by caption layout.
pub trait TextMeasure {
    /// Advance width in pixels of `text` set at `size_px`, trailing whitespace included.
    fn measure(&mut self, text: &str, size_px: f32) -> f32;
}

/// Deterministic metrics: every character advances by `advance_em * size_px`.
///
/// Useful for layout previews where no font is loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasure {
    /// Advance per character, in em.
    pub advance_em: f32,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&mut self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * self.advance_em * size_px
    }
}
