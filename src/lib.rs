//! adcomp composes social-ad creatives from already generated images.
//!
//! - Burn a word-wrapped, outlined caption into a still and export it as PNG
//! - Slice a `rows x cols` sprite sheet into an ordered frame sequence, caption on every frame
//! - Assemble the frames into a looping GIF, optionally on a worker thread
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// Caller configuration loaded from JSON.
pub mod config;
/// Animated GIF assembly.
pub mod encode;
/// End-to-end still export and sprite-sheet animation.
pub mod pipeline;
/// Raster surfaces.
pub mod render;
/// Sprite-sheet slicing.
pub mod sprite;
/// Caption shaping, wrapping, layout and drawing.
pub mod text;

pub use crate::assets::decode::decode_image;
pub use crate::assets::source::{DataUri, ImageSource, to_data_uri};
pub use crate::foundation::core::{
    Affine, AnimationTiming, AspectRatio, Canvas, EXPORT_WIDTH_PX, GridSpec, Rgba8,
};
pub use crate::foundation::error::{AdcompError, AdcompResult};

pub use crate::config::ComposerConfig;
pub use crate::encode::assembler::{
    AnimatedAsset, AnimationEncoder, EncodeJob, GifAssembler, GifSettings, drive_sink,
};
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{
    DEFAULT_ANIMATION_FILE_NAME, DEFAULT_STILL_FILE_NAME, ExportedImage, animate_sprite_sheet,
    export_still,
};
pub use crate::render::surface::Surface;
pub use crate::sprite::slicer::{SlicedSpriteSheet, SpriteSheetSlicer};
pub use crate::text::engine::TextLayoutEngine;
pub use crate::text::measure::{FixedAdvanceMeasure, TextMeasure};
pub use crate::text::overlay::{
    CaptionOverlay, NoOverlay, OverlayLayout, OverlayLine, OverlayMetrics, OverlayStyle,
    TextOverlayRenderer, layout_caption,
};
pub use crate::text::wrap::wrap_words;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
