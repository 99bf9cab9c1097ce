//! Avatarcrop WASM - WebAssembly bindings for the avatar cropper
//!
//! This crate exposes the avatarcrop-core session to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `session` - The editing session: picking, gestures, confirm
//! - `types` - WASM-compatible bitmap wrapper
//! - `encode` - JPEG export of the finished avatar
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsAvatarSession, encode_jpeg_from_bitmap } from '@avatarcrop/wasm';
//!
//! await init();
//!
//! const session = new JsAvatarSession(undefined);
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.confirm((avatar) => {
//!   if (avatar) upload(encode_jpeg_from_bitmap(avatar, 90));
//! });
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod session;
mod types;

pub use encode::encode_jpeg_from_bitmap;
pub use session::JsAvatarSession;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
