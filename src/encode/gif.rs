use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;

/// NeuQuant speed passed to the GIF encoder (1 = best quality, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Sink that assembles pushed frames into a looping GIF held in memory.
///
/// Frames are buffered until `end`, which writes the whole file in one go.
#[derive(Default)]
pub struct GifSink {
    cfg: Option<SinkConfig>,
    delay: Option<image::Delay>,
    frames: Vec<image::Frame>,
    next_idx: usize,
    output: Option<Vec<u8>>,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("cfg", &self.cfg)
            .field("frames", &self.frames.len())
            .field("output_len", &self.output.as_ref().map(Vec::len))
            .finish()
    }
}

impl GifSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the encoded GIF bytes produced by `end`.
    pub fn take_output(&mut self) -> Option<Vec<u8>> {
        self.output.take()
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> AdcompResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AdcompError::encoding(
                "gif width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(AdcompError::encoding(format!(
                "gif dimensions {}x{} exceed the format limit of 65535",
                cfg.width, cfg.height
            )));
        }
        if !cfg.frame_duration_secs.is_finite() || cfg.frame_duration_secs <= 0.0 {
            return Err(AdcompError::encoding(
                "frame duration must be finite and > 0 seconds",
            ));
        }

        let duration = Duration::try_from_secs_f64(cfg.frame_duration_secs)
            .map_err(|e| AdcompError::encoding(format!("invalid frame duration: {e}")))?;
        self.delay = Some(image::Delay::from_saturating_duration(duration));
        self.cfg = Some(cfg);
        self.frames.clear();
        self.next_idx = 0;
        self.output = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Surface) -> AdcompResult<()> {
        let (Some(cfg), Some(delay)) = (self.cfg, self.delay) else {
            return Err(AdcompError::encoding("push_frame called before begin"));
        };
        if idx != self.next_idx {
            return Err(AdcompError::encoding(format!(
                "frames must arrive in order: expected index {}, got {idx}",
                self.next_idx
            )));
        }
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(AdcompError::encoding(format!(
                "frame {idx} is {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let rgba = frame.to_rgba_image()?;
        self.frames.push(image::Frame::from_parts(rgba, 0, 0, delay));
        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> AdcompResult<()> {
        if self.cfg.is_none() {
            return Err(AdcompError::encoding("end called before begin"));
        }
        if self.frames.is_empty() {
            return Err(AdcompError::encoding("no frames to encode"));
        }

        let mut buf = Vec::new();
        {
            // The trailer is written when the encoder drops, so it must go before `buf` is read.
            let mut encoder = GifEncoder::new_with_speed(&mut buf, QUANTIZE_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| AdcompError::encoding(format!("set gif repeat: {e}")))?;
            encoder
                .encode_frames(self.frames.drain(..))
                .map_err(|e| AdcompError::encoding(format!("encode gif frames: {e}")))?;
        }
        self.output = Some(buf);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
