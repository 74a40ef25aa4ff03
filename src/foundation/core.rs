use crate::foundation::error::{AdcompError, AdcompResult};

pub use kurbo::Affine;

/// Output width shared by every export canvas.
pub const EXPORT_WIDTH_PX: u32 = 1080;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> AdcompResult<Self> {
        if width == 0 || height == 0 {
            return Err(AdcompError::degenerate(format!(
                "canvas must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Aspect ratio of the exported ad; determines the export canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Vertical,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Vertical => "9:16",
        }
    }

    /// 1080x1080 for square, 1080x1920 for vertical.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Square => Canvas {
                width: EXPORT_WIDTH_PX,
                height: EXPORT_WIDTH_PX,
            },
            Self::Vertical => Canvas {
                width: EXPORT_WIDTH_PX,
                height: 1920,
            },
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = AdcompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" | "square" => Ok(Self::Square),
            "9:16" | "vertical" => Ok(Self::Vertical),
            other => Err(AdcompError::validation(format!(
                "unknown aspect ratio '{other}' (expected 1:1 or 9:16)"
            ))),
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sprite-sheet grid layout, read row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32) -> AdcompResult<Self> {
        let grid = Self { rows, cols };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(self) -> AdcompResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(AdcompError::validation(format!(
                "sprite grid must have rows>0 and cols>0, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    pub fn cell_count(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Floor-divided cell size for a sheet of `width x height`.
    pub fn cell_size(self, width: u32, height: u32) -> (u32, u32) {
        (width / self.cols.max(1), height / self.rows.max(1))
    }
}

/// Uniform per-frame display duration of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationTiming {
    /// Per-frame display time. Build through [`AnimationTiming::from_millis`], which rejects 0;
    /// deserialized values are checked by `ComposerConfig::validate`.
    pub frame_duration_ms: u32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            frame_duration_ms: 120,
        }
    }
}

impl AnimationTiming {
    pub fn from_millis(frame_duration_ms: u32) -> AdcompResult<Self> {
        if frame_duration_ms == 0 {
            return Err(AdcompError::validation("frame duration must be > 0 ms"));
        }
        Ok(Self { frame_duration_ms })
    }

    /// Duration in seconds, the unit the GIF encoder takes.
    pub fn encoder_duration_secs(self) -> f64 {
        f64::from(self.frame_duration_ms) / 1000.0
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
