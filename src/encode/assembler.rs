use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;

use crate::assets::source::to_data_uri;
use crate::encode::gif::GifSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::AnimationTiming;
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;

pub const GIF_MIME: &str = "image/gif";

/// Encoder parameters at the GIF boundary.
///
/// The encoder takes its per-frame duration in seconds while [`AnimationTiming`] carries
/// milliseconds; the conversion happens exactly once, in [`GifSettings::from_timing`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GifSettings {
    pub width: u32,
    pub height: u32,
    pub frame_duration_secs: f64,
}

impl GifSettings {
    pub fn from_timing(width: u32, height: u32, timing: AnimationTiming) -> Self {
        Self {
            width,
            height,
            frame_duration_secs: timing.encoder_duration_secs(),
        }
    }

    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.width,
            height: self.height,
            frame_duration_secs: self.frame_duration_secs,
        }
    }
}

/// A finished looping animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatedAsset {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    pub frame_duration_ms: u32,
}

impl AnimatedAsset {
    pub fn mime(&self) -> &'static str {
        GIF_MIME
    }

    /// Self-contained `data:image/gif;base64,...` reference.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(GIF_MIME, &self.bytes)
    }

    pub fn write_to(&self, path: &Path) -> AdcompResult<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write animation to '{}'", path.display()))?;
        Ok(())
    }
}

/// Turns an ordered frame sequence into an animated asset.
pub trait AnimationEncoder {
    fn encode(
        &self,
        frames: Vec<Surface>,
        width: u32,
        height: u32,
        timing: AnimationTiming,
    ) -> AdcompResult<AnimatedAsset>;
}

/// Assembles frames into an infinitely looping GIF.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifAssembler;

impl GifAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Encode on the calling thread.
    #[tracing::instrument(skip(self, frames), fields(frames = frames.len()))]
    pub fn encode_frames(
        &self,
        frames: &[Surface],
        width: u32,
        height: u32,
        timing: AnimationTiming,
    ) -> AdcompResult<AnimatedAsset> {
        let settings = GifSettings::from_timing(width, height, timing);
        let mut sink = GifSink::new();
        drive_sink(&mut sink, frames, settings)?;
        let bytes = sink
            .take_output()
            .ok_or_else(|| AdcompError::encoding("encoder finished without output"))?;
        tracing::debug!(bytes = bytes.len(), "gif assembled");

        Ok(AnimatedAsset {
            bytes,
            width,
            height,
            frame_count: frames.len(),
            frame_duration_ms: timing.frame_duration_ms,
        })
    }

    /// Encode on a worker thread. The returned job yields exactly one outcome.
    pub fn spawn(
        &self,
        frames: Vec<Surface>,
        width: u32,
        height: u32,
        timing: AnimationTiming,
    ) -> EncodeJob {
        let (tx, rx) = mpsc::sync_channel(1);
        let assembler = *self;
        let spawned = std::thread::Builder::new()
            .name("adcomp-gif".to_owned())
            .spawn(move || {
                let outcome = assembler.encode_frames(&frames, width, height, timing);
                // The receiver may be gone if the caller dropped the job.
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(handle) => EncodeJob {
                rx: Some(rx),
                handle: Some(handle),
                pending_error: None,
            },
            Err(e) => EncodeJob {
                rx: None,
                handle: None,
                pending_error: Some(AdcompError::encoding(format!(
                    "failed to start encoder thread: {e}"
                ))),
            },
        }
    }
}

impl AnimationEncoder for GifAssembler {
    fn encode(
        &self,
        frames: Vec<Surface>,
        width: u32,
        height: u32,
        timing: AnimationTiming,
    ) -> AdcompResult<AnimatedAsset> {
        self.spawn(frames, width, height, timing).wait()
    }
}

/// Feed `frames` to `sink` in order. Any failure surfaces as an encoding error.
pub fn drive_sink(
    sink: &mut dyn FrameSink,
    frames: &[Surface],
    settings: GifSettings,
) -> AdcompResult<()> {
    if frames.is_empty() {
        return Err(AdcompError::encoding("no frames to encode"));
    }
    push_all(sink, frames, settings).map_err(|e| match e {
        AdcompError::AnimationEncoding(_) => e,
        other => AdcompError::encoding(other.to_string()),
    })
}

fn push_all(sink: &mut dyn FrameSink, frames: &[Surface], settings: GifSettings) -> AdcompResult<()> {
    sink.begin(settings.sink_config())?;
    for (idx, frame) in frames.iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    sink.end()
}

/// Handle to an in-flight encode.
#[derive(Debug)]
pub struct EncodeJob {
    rx: Option<mpsc::Receiver<AdcompResult<AnimatedAsset>>>,
    handle: Option<std::thread::JoinHandle<()>>,
    pending_error: Option<AdcompError>,
}

impl EncodeJob {
    /// Block until the worker reports.
    pub fn wait(mut self) -> AdcompResult<AnimatedAsset> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        let outcome = match self.rx.take() {
            Some(rx) => rx.recv().map_err(|_| {
                AdcompError::encoding("encoder thread exited without reporting a result")
            })?,
            None => return Err(AdcompError::encoding("encode job already completed")),
        };
        self.join_worker();
        outcome
    }

    /// Non-blocking poll. Returns `Some` once, when the outcome is available.
    pub fn try_result(&mut self) -> Option<AdcompResult<AnimatedAsset>> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(err));
        }
        let rx = self.rx.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => Err(AdcompError::encoding(
                "encoder thread exited without reporting a result",
            )),
        };
        self.rx = None;
        self.join_worker();
        Some(outcome)
    }

    fn join_worker(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("gif encoder thread panicked after reporting");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/assembler.rs"]
mod tests;
