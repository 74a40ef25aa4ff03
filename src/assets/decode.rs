use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ...) into a premultiplied [`Surface`].
///
/// Undecodable bytes and zero-sized images are reported as [`AdcompError::InvalidImage`] and
/// [`AdcompError::DegenerateDimensions`] respectively.
pub fn decode_image(bytes: &[u8]) -> AdcompResult<Surface> {
    if bytes.is_empty() {
        return Err(AdcompError::invalid_image("image bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| AdcompError::invalid_image(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AdcompError::degenerate(format!(
            "decoded image has zero dimensions ({width}x{height})"
        )));
    }

    Surface::from_rgba_image(rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
