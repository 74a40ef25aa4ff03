use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let surface = decode_image(&buf).unwrap();
    assert_eq!(surface.width(), 1);
    assert_eq!(surface.height(), 1);
    assert_eq!(
        surface.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage_as_invalid_image() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, AdcompError::InvalidImage(_)));

    let err = decode_image(&[]).unwrap_err();
    assert!(matches!(err, AdcompError::InvalidImage(_)));
}

#[test]
fn decode_image_handles_jpeg() {
    let img = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 200, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();

    let surface = decode_image(&buf).unwrap();
    assert_eq!((surface.width(), surface.height()), (4, 2));
    assert_eq!(surface.pixel(0, 0).unwrap()[3], 255);
}
