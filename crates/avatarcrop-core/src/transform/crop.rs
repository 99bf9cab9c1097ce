//! Pixel-buffer cropping.
//!
//! Crops operate on the raw (stored-order) buffer with integer rectangles
//! produced by [`PixelRect::from_rect`](crate::geometry::PixelRect::from_rect).

use thiserror::Error;

use crate::decode::{Bitmap, DecodeError};
use crate::geometry::{CropRect, PixelRect};

/// Errors that can occur while producing the cropped avatar.
#[derive(Debug, Error)]
pub enum CropError {
    /// Nothing of the requested rectangle lies inside the buffer.
    #[error("Crop region {rect:?} is empty inside the {buffer_width}x{buffer_height} buffer")]
    EmptyRegion {
        rect: CropRect,
        buffer_width: u32,
        buffer_height: u32,
    },

    /// Integer rectangle extends past the buffer edge.
    #[error("Pixel region {region} exceeds the {buffer_width}x{buffer_height} buffer")]
    OutOfBounds {
        region: PixelRect,
        buffer_width: u32,
        buffer_height: u32,
    },

    /// The source or cropped bitmap could not be processed.
    #[error("Image processing failed: {0}")]
    Decode(#[from] DecodeError),

    /// The background crop task did not run to completion.
    #[error("Crop task failed: {0}")]
    TaskFailed(String),
}

/// Copy `region` out of `image`.
///
/// # Errors
///
/// Returns `CropError::OutOfBounds` if the region is not fully inside the
/// buffer and `CropError::Decode` if the buffer length is inconsistent.
pub fn crop_bitmap(image: &Bitmap, region: PixelRect) -> Result<Bitmap, CropError> {
    let expected = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(DecodeError::BufferMismatch {
            expected,
            actual: image.pixels.len(),
        }
        .into());
    }

    let fits = region.width > 0
        && region.height > 0
        && region.x.checked_add(region.width).is_some_and(|r| r <= image.width)
        && region.y.checked_add(region.height).is_some_and(|b| b <= image.height);
    if !fits {
        return Err(CropError::OutOfBounds {
            region,
            buffer_width: image.width,
            buffer_height: image.height,
        });
    }

    // Fast path: full-buffer crop returns a clone
    if region.x == 0 && region.y == 0 && region.width == image.width && region.height == image.height
    {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = region.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    // Copy pixel data row by row
    for y in region.y..region.y + region.height {
        let start = y as usize * src_stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(Bitmap::new(region.width, region.height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    /// Strategy for an image size and a region inside it.
    fn image_and_region() -> impl Strategy<Value = (u32, u32, PixelRect)> {
        (4u32..=64, 4u32..=64).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x, y)| {
                (1..=w - x, 1..=h - y).prop_map(move |(rw, rh)| {
                    (
                        w,
                        h,
                        PixelRect {
                            x,
                            y,
                            width: rw,
                            height: rh,
                        },
                    )
                })
            })
        })
    }

    proptest! {
        /// Property: Output dimensions equal the requested region.
        #[test]
        fn prop_output_matches_region((w, h, r) in image_and_region()) {
            let img = create_test_image(w, h);
            let result = crop_bitmap(&img, r).unwrap();

            prop_assert_eq!(result.width, r.width);
            prop_assert_eq!(result.height, r.height);
            prop_assert_eq!(result.pixels.len(), (r.width * r.height * 3) as usize);
        }

        /// Property: The first output pixel is the region's top-left source pixel.
        #[test]
        fn prop_first_pixel_from_region_origin((w, h, r) in image_and_region()) {
            let img = create_test_image(w, h);
            let result = crop_bitmap(&img, r).unwrap();

            let expected = ((r.y * w + r.x) % 256) as u8;
            prop_assert_eq!(result.pixels[0], expected);
        }
    }
}
