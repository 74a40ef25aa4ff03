use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::foundation::math::{
    premul_over_in_place, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};

/// Owned raster surface in premultiplied RGBA8 form.
///
/// Every compositing step creates its own surface and hands it on by value; nothing keeps a
/// drawing surface alive between operations.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface of `width x height`.
    pub fn new(width: u32, height: u32) -> AdcompResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap bytes that are already premultiplied RGBA8, row-major and tightly packed.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> AdcompResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(AdcompError::validation(format!(
                "surface byte len mismatch: expected {len}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a surface from a straight-alpha image.
    pub fn from_rgba_image(img: image::RgbaImage) -> AdcompResult<Self> {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Copy the `w x h` region at `(x, y)` into a new surface.
    ///
    /// Returns `None` if the region is empty or not fully inside this surface.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Option<Surface> {
        if w == 0 || h == 0 {
            return None;
        }
        let x_end = x.checked_add(w)?;
        let y_end = y.checked_add(h)?;
        if x_end > self.width || y_end > self.height {
            return None;
        }

        let stride = (self.width as usize) * 4;
        let row_len = (w as usize) * 4;
        let mut data = Vec::with_capacity(row_len * (h as usize));
        for row in y..y_end {
            let start = (row as usize) * stride + (x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Some(Surface {
            width: w,
            height: h,
            data,
        })
    }

    /// Stretch this surface onto a fresh `canvas`-sized surface.
    pub fn scaled_to(&self, canvas: Canvas) -> AdcompResult<Surface> {
        if canvas.width == self.width && canvas.height == self.height {
            return Ok(self.clone());
        }
        byte_len(canvas.width, canvas.height)?;
        // Interpolating premultiplied channels keeps edges free of dark fringes.
        let src = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| AdcompError::validation("surface buffer does not match its size"))?;
        let resized = image::imageops::resize(
            &src,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        Self::from_premul_rgba8(canvas.width, canvas.height, resized.into_raw())
    }

    /// Composite a premultiplied RGBA8 layer of the same size over this surface.
    pub fn composite_over(&mut self, layer: &[u8]) -> AdcompResult<()> {
        if !premul_over_in_place(&mut self.data, layer) {
            return Err(AdcompError::validation(
                "composite layer must match the surface byte length",
            ));
        }
        Ok(())
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_rgba_image(&self) -> AdcompResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| AdcompError::validation("surface buffer does not match its size"))
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> AdcompResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface as png")?;
        Ok(buf)
    }
}

fn byte_len(width: u32, height: u32) -> AdcompResult<usize> {
    if width == 0 || height == 0 {
        return Err(AdcompError::degenerate(format!(
            "surface must be at least 1x1, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| AdcompError::validation("surface dimensions overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
