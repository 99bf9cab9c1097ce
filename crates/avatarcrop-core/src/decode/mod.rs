//! Picked image ingestion.
//!
//! This module provides functionality for:
//! - Decoding picked photo files while keeping the stored pixel order
//! - Reading the EXIF orientation tag
//! - Resizing the final crop to the configured avatar size
//!
//! # Raw Buffers
//!
//! Photos from cameras are often stored sideways with an orientation tag.
//! Unlike a viewer, the picker does NOT rotate on decode: crop geometry maps
//! its rectangle back onto the stored buffer, and only the small cropped
//! region is rotated upright afterwards (see `transform::orient`).

mod picker;
mod resize;
mod types;

pub use picker::{decode_picked_image, read_orientation};
pub use resize::{resize, resize_to_side};
pub use types::{Bitmap, DecodeError, FilterType, PickedImage, PickerOutcome};
