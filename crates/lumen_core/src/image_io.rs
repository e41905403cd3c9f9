//! Bitmap output for rendered color buffers.
//!
//! The renderer produces one linear float color per pixel, stored in render
//! order: row 0 is the *bottom* of the view. Writing flips the rows so the
//! saved file is upright.

use std::path::Path;

use image::{ImageFormat, RgbImage};
use lumen_math::Color;
use thiserror::Error;

/// Errors that can occur while encoding or writing an image.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("Pixel buffer holds {actual} colors, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Quantize a color to 8 bits per channel.
///
/// Each channel is scaled by 255 and truncated. Out-of-range values
/// saturate at 0 and 255.
#[inline]
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}

/// Quantize a bottom-to-top color buffer into an upright RGB image.
pub fn encode_rgb8(width: u32, height: u32, pixels: &[Color]) -> ImageIoResult<RgbImage> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(ImageIoError::SizeMismatch {
            width,
            height,
            actual: pixels.len(),
        });
    }

    let mut bytes = Vec::with_capacity(expected * 3);
    for color in pixels {
        bytes.extend_from_slice(&color_to_rgb8(*color));
    }

    let mut image = RgbImage::from_raw(width, height, bytes).ok_or(ImageIoError::SizeMismatch {
        width,
        height,
        actual: pixels.len(),
    })?;
    image::imageops::flip_vertical_in_place(&mut image);
    Ok(image)
}

/// Write a color buffer to `path` as a BMP file.
pub fn save_bmp<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    pixels: &[Color],
) -> ImageIoResult<()> {
    let path = path.as_ref();
    let image = encode_rgb8(width, height, pixels)?;
    image.save_with_format(path, ImageFormat::Bmp)?;
    log::info!("Wrote {}x{} bitmap to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgb8_truncates() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        // 0.5 * 255 = 127.5, truncated
        assert_eq!(color_to_rgb8(Color::new(0.5, 0.999, 0.0)), [127, 254, 0]);
    }

    #[test]
    fn test_color_to_rgb8_saturates() {
        assert_eq!(color_to_rgb8(Color::new(-1.0, 2.0, f32::NAN)), [0, 255, 0]);
    }

    #[test]
    fn test_encode_flips_rows() {
        // Row 0 (bottom of the view) red, row 1 (top) blue.
        let pixels = vec![
            Color::new(1.0, 0.0, 0.0),
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            Color::new(0.0, 0.0, 1.0),
        ];

        let image = encode_rgb8(2, 2, &pixels).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_encode_rejects_wrong_length() {
        let pixels = vec![Color::ZERO; 3];
        assert!(matches!(
            encode_rgb8(2, 2, &pixels),
            Err(ImageIoError::SizeMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_save_bmp_writes_readable_file() {
        let path = std::env::temp_dir().join(format!("lumen_test_{}.bmp", std::process::id()));
        let pixels = vec![Color::new(0.0, 1.0, 0.0); 4 * 3];

        save_bmp(&path, 4, 3, &pixels).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(2, 1).0, [0, 255, 0]);

        std::fs::remove_file(&path).ok();
    }
}
