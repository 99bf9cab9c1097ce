//! Avatar encoding WASM bindings.
//!
//! ```typescript
//! session.confirm((avatar) => {
//!   if (avatar) upload(encode_jpeg_from_bitmap(avatar, 90));
//! });
//! ```

use crate::types::JsBitmap;
use avatarcrop_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns an error if the bitmap is empty or its buffer is malformed.
#[wasm_bindgen]
pub fn encode_jpeg_from_bitmap(bitmap: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&bitmap.to_bitmap(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
