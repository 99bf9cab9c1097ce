//! Avatar session WASM bindings.
//!
//! Wraps the core session for a browser front end. The gesture recogniser
//! feeds `update_scale`/`update_drag` and calls `end_gesture` when the
//! fingers lift; rendering reads `live_transform()` and `overlay()`.
//!
//! ```typescript
//! const session = new JsAvatarSession({ screen_width: 390, output_size: 256 });
//! const fit = session.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! session.update_scale(1.4);
//! session.update_drag(12, -30);
//! session.end_gesture();
//!
//! session.confirm((avatar) => avatar ? show(avatar) : retry());
//! ```

use avatarcrop_core::overlay::{crop_window_frame, dim_opacity, guide_lines, GuideLine};
use avatarcrop_core::session::GestureState;
use avatarcrop_core::{decode_picked_image, AvatarSession, CropRect, CropperConfig, PanOffset};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsBitmap;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js)
}

/// Overlay layout for the current gesture.
#[derive(Debug, Serialize)]
struct Overlay {
    frame: CropRect,
    guides: Vec<GuideLine>,
    dim_opacity: f64,
}

/// A JS-facing avatar editing session.
#[wasm_bindgen]
pub struct JsAvatarSession {
    inner: AvatarSession,
}

#[wasm_bindgen]
impl JsAvatarSession {
    /// Create a session. `config` is a partial `CropperConfig` object, or
    /// `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAvatarSession, JsValue> {
        let config: CropperConfig = if config.is_undefined() || config.is_null() {
            CropperConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js)?
        };
        Self::with_config(config).map_err(to_js)
    }

    /// Decode picked file bytes and fit the image. Returns the fit.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let image = decode_picked_image(bytes).map_err(to_js)?;
        let fit = self.inner.load_image(image).map_err(to_js)?;
        to_value(&fit)
    }

    /// The user dismissed the picker.
    pub fn cancel_picker(&mut self) {
        self.inner.cancel();
    }

    pub fn update_scale(&mut self, factor: f64) -> Result<(), JsValue> {
        self.inner.update_scale(factor).map_err(to_js)
    }

    pub fn update_drag(&mut self, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.inner.update_drag(PanOffset::new(dx, dy)).map_err(to_js)
    }

    /// Commit the gesture. Returns `{ img_scale, pan }`.
    pub fn end_gesture(&mut self) -> Result<JsValue, JsValue> {
        let committed = self.inner.end_gesture().map_err(to_js)?;
        to_value(&committed)
    }

    pub fn cancel_gesture(&mut self) {
        self.inner.cancel_gesture();
    }

    /// `{ scale, offset, display_size }` to render, or `null` with no image.
    pub fn live_transform(&self) -> Result<JsValue, JsValue> {
        match self.inner.live_transform() {
            Some(live) => to_value(&live),
            None => Ok(JsValue::NULL),
        }
    }

    /// Fit of the loaded image, or `null`.
    pub fn fit(&self) -> Result<JsValue, JsValue> {
        match self.inner.fit() {
            Some(fit) => to_value(&fit),
            None => Ok(JsValue::NULL),
        }
    }

    /// Crop window frame, guide lines and mask opacity in container coordinates.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        to_value(&self.overlay_layout())
    }

    #[wasm_bindgen(getter)]
    pub fn confirm_enabled(&self) -> bool {
        self.inner.is_confirm_enabled()
    }

    /// Crop the image and call `callback` once with a `JsBitmap`, or with
    /// `null` if the crop failed. Confirm is enabled again after a failure.
    ///
    /// # Errors
    ///
    /// Returns an error without calling `callback` if no image is loaded or
    /// a crop is already running.
    pub fn confirm(&mut self, callback: &js_sys::Function) -> Result<(), JsValue> {
        let request = self.inner.confirm().map_err(to_js)?;
        let result = request.execute();

        match self.inner.finish_crop(request.generation, result) {
            Ok(avatar) => {
                callback.call1(&JsValue::NULL, &JsBitmap::from_bitmap(avatar).into())?;
            }
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("avatar crop failed: {e}")));
                callback.call1(&JsValue::NULL, &JsValue::NULL)?;
            }
        }
        Ok(())
    }

    /// Abandon the session and return to the picker.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

impl JsAvatarSession {
    pub(crate) fn with_config(config: CropperConfig) -> Result<Self, avatarcrop_core::ConfigError> {
        Ok(Self {
            inner: AvatarSession::new(config)?,
        })
    }

    fn overlay_layout(&self) -> Overlay {
        let config = self.inner.config();
        let frame = crop_window_frame(config.container_size(), config.margin, self.inner.viewport().side);
        let gesture: GestureState = self.inner.gesture();
        Overlay {
            frame,
            guides: guide_lines(frame),
            dim_opacity: dim_opacity(&gesture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatarcrop_core::session::Phase;
    use avatarcrop_core::{Bitmap, Orientation, PickedImage};

    fn session_with_image() -> JsAvatarSession {
        let mut session = JsAvatarSession::with_config(CropperConfig::default()).unwrap();
        let bitmap = Bitmap::new(40, 80, vec![90u8; 40 * 80 * 3]);
        session
            .inner
            .load_image(PickedImage::new(bitmap, Orientation::Up).unwrap())
            .unwrap();
        session
    }

    #[test]
    fn test_gestures_pass_through() {
        let mut session = session_with_image();
        assert!(session.confirm_enabled());

        session.update_drag(0.0, 50.0).unwrap();
        assert_eq!(session.overlay_layout().dim_opacity, 0.0);

        session.cancel_gesture();
        assert_eq!(session.overlay_layout().dim_opacity, 0.6);
        assert_eq!(session.inner.committed().unwrap().pan, PanOffset::default());
    }

    #[test]
    fn test_overlay_layout() {
        let session = session_with_image();
        let overlay = session.overlay_layout();

        assert_eq!(overlay.frame, CropRect::new(20.0, 146.0, 335.0, 335.0));
        assert_eq!(overlay.guides.len(), 8);
    }

    #[test]
    fn test_cancel_picker() {
        let mut session = session_with_image();
        session.cancel_picker();

        assert_eq!(session.inner.phase(), Phase::NoImage);
        assert!(!session.confirm_enabled());
    }
}
