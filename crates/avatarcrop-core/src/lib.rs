//! Avatarcrop Core - avatar picking and cropping
//!
//! This crate provides the core of an avatar cropper: fitting a picked photo
//! behind a square crop window, keeping pan/zoom inside the photo, and
//! turning the final transform into a crop of the raw pixel buffer for any
//! EXIF orientation.

pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod orientation;
pub mod overlay;
pub mod session;
pub mod transform;

pub use config::{ConfigError, CropperConfig};
pub use decode::{decode_picked_image, Bitmap, DecodeError, PickedImage, PickerOutcome};
pub use encode::{encode_jpeg, EncodeError};
pub use geometry::{clamp_pan, compute_crop_rect, compute_initial_fit, CropRect, FitResult, PanOffset, Size, Viewport};
pub use orientation::Orientation;
pub use session::{AvatarSession, CropRequest, Phase, SessionError};
pub use transform::CropError;
