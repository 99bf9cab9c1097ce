//! Avatar encoding.
//!
//! The confirmed avatar is handed back to the caller as a `Bitmap`; callers
//! that need to upload it encode it here first.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
