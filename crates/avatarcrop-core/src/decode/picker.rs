//! Ingestion of picked photo files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;
use tracing::debug;

use super::{Bitmap, DecodeError, PickedImage};
use crate::orientation::Orientation;

/// Decode picked file bytes into a [`PickedImage`].
///
/// The pixels are kept in stored order; the EXIF orientation tag is read
/// separately so crop rectangles can be remapped onto the raw buffer.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded and
/// `DecodeError::InvalidDimensions` if the decoded image is empty.
pub fn decode_picked_image(bytes: &[u8]) -> Result<PickedImage, DecodeError> {
    let orientation = read_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let bitmap = Bitmap::from_rgb_image(img.into_rgb8());
    debug!(
        width = bitmap.width,
        height = bitmap.height,
        ?orientation,
        "decoded picked image"
    );
    PickedImage::new(bitmap, orientation)
}

/// Read the EXIF orientation of an image file.
///
/// Returns `Orientation::Up` if no EXIF data is found or the tag is missing.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Up,
    }
}
