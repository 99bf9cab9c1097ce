//! Pixel operations applied once the crop rectangle is known.
//!
//! # Transform Order
//!
//! When the user confirms, the avatar is produced in this order:
//! 1. Crop the raw (stored-order) buffer
//! 2. Rotate/flip the cropped region upright
//! 3. Resize to the configured avatar size (optional)
//!
//! Cropping before rotating keeps the rotation cost proportional to the
//! avatar, not to the full photo.

mod crop;
mod orient;

pub use crop::{crop_bitmap, CropError};
pub use orient::to_upright;
