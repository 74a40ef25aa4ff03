//! Raster surfaces.
//!
//! Every operation creates its surfaces fresh and passes them on by value.

/// Premultiplied RGBA8 surface with crop, scale and PNG export.
pub mod surface;
