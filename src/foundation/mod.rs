/// Core value types: canvases, aspect ratios, sprite grids, timing, colors.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
