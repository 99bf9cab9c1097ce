//! Turning a stored-order crop into an upright bitmap.

use image::DynamicImage;

use crate::decode::{Bitmap, DecodeError};
use crate::orientation::Orientation;

/// Apply the display orientation to a raw bitmap.
///
/// For the four rotations the result is what the user saw inside the crop
/// window, and downstream consumers no longer need the orientation tag.
/// Mirrored tags reuse their base rotation's origin remap (see
/// [`Orientation::origin_remap`]), so their region is taken from the
/// reflected window position before the flip is applied here.
///
/// # Errors
///
/// Returns `DecodeError::BufferMismatch` if the buffer length is inconsistent.
pub fn to_upright(image: &Bitmap, orientation: Orientation) -> Result<Bitmap, DecodeError> {
    if orientation == Orientation::Up {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image().ok_or(DecodeError::BufferMismatch {
        expected: (image.width as usize) * (image.height as usize) * 3,
        actual: image.pixels.len(),
    })?;
    let oriented = apply_orientation(DynamicImage::ImageRgb8(rgb), orientation);
    Ok(Bitmap::from_rgb_image(oriented.into_rgb8()))
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Up => img,
        Orientation::UpMirrored => img.fliph(),
        Orientation::Down => img.rotate180(),
        Orientation::DownMirrored => img.flipv(),
        Orientation::LeftMirrored => img.rotate90().fliph(),
        Orientation::Right => img.rotate90(),
        Orientation::RightMirrored => img.rotate270().fliph(),
        Orientation::Left => img.rotate270(),
    }
}
