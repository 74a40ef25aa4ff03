use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::{AnimationTiming, AspectRatio, GridSpec};
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::text::overlay::{CaptionOverlay, NoOverlay, OverlayStyle, TextOverlayRenderer};

/// Caller configuration for still export and sprite-sheet animation.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub aspect_ratio: AspectRatio,
    pub grid: GridSpec,
    pub frame_duration_ms: u32,
    pub overlay: OverlayStyle,
    /// TrueType/OpenType font used for captions.
    pub font_path: Option<PathBuf>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            grid: GridSpec::default(),
            frame_duration_ms: AnimationTiming::default().frame_duration_ms,
            overlay: OverlayStyle::default(),
            font_path: None,
        }
    }
}

impl ComposerConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> AdcompResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| AdcompError::validation(format!("parse composer config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> AdcompResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdcompResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AdcompError::validation(format!("open composer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> AdcompResult<()> {
        self.grid.validate()?;
        self.timing()?;
        self.overlay.validate()
    }

    pub fn timing(&self) -> AdcompResult<AnimationTiming> {
        AnimationTiming::from_millis(self.frame_duration_ms)
    }

    /// Build the caption overlay for `caption`.
    ///
    /// An empty caption needs no font, so a missing `font_path` yields [`NoOverlay`] there;
    /// any other caption requires a font.
    pub fn build_overlay(&self, caption: &str) -> AdcompResult<Box<dyn CaptionOverlay>> {
        match &self.font_path {
            Some(path) => Ok(Box::new(TextOverlayRenderer::from_font_path(
                path,
                self.overlay,
            )?)),
            None if caption.trim().is_empty() => Ok(Box::new(NoOverlay)),
            None => Err(AdcompError::validation(
                "a font is required to draw a non-empty caption",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
