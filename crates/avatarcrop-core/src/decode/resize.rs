//! Output sizing for cropped avatars.
//!
//! All functions return new `Bitmap` instances without modifying the input.

use super::{Bitmap, DecodeError, FilterType};

/// Resize a bitmap to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero
/// and `DecodeError::BufferMismatch` if the source buffer is malformed.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(DecodeError::BufferMismatch {
        expected: (image.width as usize) * (image.height as usize) * 3,
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgb_image(resized))
}

/// Resize a crop to a `side x side` avatar.
///
/// Crops that came out one pixel off square from rounding are stretched onto
/// the square; the distortion is below a pixel.
pub fn resize_to_side(image: &Bitmap, side: u32, filter: FilterType) -> Result<Bitmap, DecodeError> {
    resize(image, side, side, filter)
}
