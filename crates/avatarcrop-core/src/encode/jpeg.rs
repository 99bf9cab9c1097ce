//! JPEG encoding of confirmed avatars.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::Bitmap;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the bitmap dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The avatar has no pixels
    #[error("Cannot encode an empty {width}x{height} avatar")]
    EmptyBitmap { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an avatar bitmap to JPEG bytes.
///
/// `quality` is clamped to 1-100. Avatars are small and viewed at thumbnail
/// scale, so 85-90 is usually enough.
///
/// # Errors
///
/// Returns `EncodeError::EmptyBitmap` for a zero-sized bitmap and
/// `EncodeError::InvalidPixelData` for a malformed buffer.
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(EncodeError::EmptyBitmap {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    let expected = (bitmap.width as usize) * (bitmap.height as usize) * 3;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::with_capacity(expected / 8));

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &bitmap.pixels,
            bitmap.width,
            bitmap.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    tracing::debug!(
        width = bitmap.width,
        height = bitmap.height,
        quality,
        bytes = bytes.len(),
        "encoded avatar"
    );
    Ok(bytes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any non-empty avatar encodes to a well-formed JPEG.
        #[test]
        fn prop_valid_bitmap_produces_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
            seed in any::<u8>(),
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_mul(37).wrapping_add(seed)).collect();
            let jpeg = encode_jpeg(&Bitmap::new(width, height, pixels), quality).unwrap();

            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Encoding is deterministic.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let bitmap = Bitmap::new(width, height, vec![100u8; size]);

            prop_assert_eq!(encode_jpeg(&bitmap, quality).unwrap(), encode_jpeg(&bitmap, quality).unwrap());
        }
    }
}
