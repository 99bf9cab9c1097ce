//! Core types for picked images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;
use crate::orientation::Orientation;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferMismatch { expected: usize, actual: usize },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An RGB bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Bitmap after checking the buffer length.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(DecodeError::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a Bitmap from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// A photo handed over by the picker.
///
/// The bitmap is kept in stored order; `orientation` says how to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    bitmap: Bitmap,
    orientation: Orientation,
}

impl PickedImage {
    /// Wrap a raw bitmap and its orientation tag.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidDimensions` for an empty bitmap.
    pub fn new(bitmap: Bitmap, orientation: Orientation) -> Result<Self, DecodeError> {
        if bitmap.is_empty() {
            return Err(DecodeError::InvalidDimensions {
                width: bitmap.width,
                height: bitmap.height,
            });
        }
        Ok(Self {
            bitmap,
            orientation,
        })
    }

    /// The raw, unrotated pixel buffer.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Pixel size as displayed, with width and height swapped for quarter turns.
    pub fn display_size(&self) -> Size {
        let raw = Size::new(self.bitmap.width as f64, self.bitmap.height as f64);
        self.orientation.raw_size(raw)
    }
}

/// What the picker produced.
#[derive(Debug, Clone)]
pub enum PickerOutcome {
    /// The user chose a photo.
    Picked(PickedImage),
    /// The user dismissed the picker.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_bitmap_from_raw_checks_length() {
        assert!(Bitmap::from_raw(2, 2, vec![0u8; 12]).is_ok());

        match Bitmap::from_raw(2, 2, vec![0u8; 11]) {
            Err(DecodeError::BufferMismatch { expected, actual }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 11);
            }
            other => panic!("Expected BufferMismatch, got: {:?}", other),
        }
    }

    #[test]
    fn test_bitmap_empty() {
        let img = Bitmap::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_picked_image_rejects_empty() {
        let result = PickedImage::new(Bitmap::new(0, 0, vec![]), Orientation::Up);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidDimensions {
                width: 0,
                height: 0
            })
        ));
    }

    #[test]
    fn test_display_size_swaps_for_quarter_turns() {
        let bitmap = Bitmap::new(6, 4, vec![0u8; 6 * 4 * 3]);

        let up = PickedImage::new(bitmap.clone(), Orientation::Up).unwrap();
        assert_eq!(up.display_size(), Size::new(6.0, 4.0));

        let right = PickedImage::new(bitmap, Orientation::Right).unwrap();
        assert_eq!(right.display_size(), Size::new(4.0, 6.0));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (10) must be non-zero"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
