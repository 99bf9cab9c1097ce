//! Conversion of the committed on-screen transform into a source crop rectangle.

use std::fmt;

use tracing::debug;

use super::pan::{effective_size, OffsetBounds};
use super::{CropRect, FitResult, PanOffset, PinnedAxis, Size};
use crate::orientation::Orientation;

/// Integer crop region inside a raw pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Snap `rect` onto the pixel grid of a `buffer_width x buffer_height` buffer.
    ///
    /// The rectangle is clamped into the buffer first and every edge is rounded
    /// to the nearest pixel. Returns `None` when nothing of it remains.
    pub fn from_rect(rect: CropRect, buffer_width: u32, buffer_height: u32) -> Option<Self> {
        let bounds = Size::new(buffer_width as f64, buffer_height as f64);
        let clamped = rect.clamped_to(bounds);
        if clamped != rect {
            debug!(?rect, ?clamped, "crop rect pulled back into buffer");
        }

        let (x, width) = snap_span(clamped.x, clamped.right(), buffer_width);
        let (y, height) = snap_span(clamped.y, clamped.bottom(), buffer_height);

        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// Round both ends of `[start, end)` and return the integer start and length.
fn snap_span(start: f64, end: f64, bound: u32) -> (u32, u32) {
    let bound = bound as f64;
    let first = start.round().clamp(0.0, bound);
    let last = end.round().clamp(first, bound);
    (first as u32, (last - first) as u32)
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// The crop window in zoomed on-screen points, relative to the image's top-left.
///
/// Always `viewport_side` square.
pub fn nominal_crop_window(
    image_size: Size,
    pan: PanOffset,
    img_scale: f64,
    origin_scale: f64,
    fit: &FitResult,
    viewport_side: f64,
) -> CropRect {
    let bounds = OffsetBounds::compute(image_size, fit, img_scale, origin_scale, viewport_side);
    CropRect::new(
        bounds.left - pan.x,
        bounds.top - pan.y,
        viewport_side,
        viewport_side,
    )
}

/// Compute the source-pixel crop rectangle for the committed transform.
///
/// The window is scaled from on-screen points into source pixels using the
/// pinned axis, then its origin is remapped for `orientation` so it addresses
/// the raw (unrotated) buffer. The result is not clamped; see
/// [`PixelRect::from_rect`].
#[allow(clippy::too_many_arguments)]
pub fn compute_crop_rect(
    image_size: Size,
    orientation: Orientation,
    pan: PanOffset,
    img_scale: f64,
    origin_scale: f64,
    fit: &FitResult,
    viewport_side: f64,
) -> CropRect {
    let window = nominal_crop_window(image_size, pan, img_scale, origin_scale, fit, viewport_side);

    let pinned_source = match fit.pinned_axis(viewport_side) {
        PinnedAxis::Width => image_size.width,
        PinnedAxis::Height => image_size.height,
    };
    let zoom = pinned_source / (viewport_side * img_scale / origin_scale);

    let scaled = window.scaled(zoom);
    let rect = orientation.remap_origin(scaled, image_size);
    debug!(
        ?window,
        zoom,
        ?orientation,
        ?rect,
        effective = ?effective_size(image_size, fit, img_scale, origin_scale, viewport_side),
        "computed crop rect"
    );
    rect
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{clamp_pan, compute_initial_fit, Viewport};
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport {
            side: 335.0,
            screen_width: 375.0,
            screen_height: 667.0,
        }
    }

    fn orientation_strategy() -> impl Strategy<Value = Orientation> {
        (1u32..=8).prop_map(Orientation::from)
    }

    proptest! {
        /// Property: The window before scaling is always exactly one side square.
        #[test]
        fn prop_nominal_window_square(
            (w, h) in (10.0f64..=5000.0, 10.0f64..=5000.0),
            zoom in 1.0f64..=4.0,
            (x, y) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let size = Size::new(w, h);
            let fit = compute_initial_fit(size, &viewport());
            let window = nominal_crop_window(
                size,
                PanOffset::new(x, y),
                fit.origin_scale * zoom,
                fit.origin_scale,
                &fit,
                335.0,
            );
            prop_assert_eq!(window.width, 335.0);
            prop_assert_eq!(window.height, 335.0);
        }

        /// Property: After clamping, the pixel rect always lies inside the raw buffer.
        #[test]
        fn prop_pixel_rect_inside_buffer(
            (w, h) in (16u32..=3000, 16u32..=3000),
            zoom in 1.0f64..=4.0,
            (x, y) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
            orientation in orientation_strategy(),
        ) {
            let size = Size::new(w as f64, h as f64);
            let fit = compute_initial_fit(size, &viewport());
            let scale = fit.origin_scale * zoom;
            let pan = clamp_pan(PanOffset::new(x, y), scale, fit.origin_scale, size, &fit, 335.0);
            let rect = compute_crop_rect(size, orientation, pan, scale, fit.origin_scale, &fit, 335.0);

            let raw = orientation.raw_size(size);
            let (bw, bh) = (raw.width as u32, raw.height as u32);
            if let Some(px) = PixelRect::from_rect(rect, bw, bh) {
                prop_assert!(px.x + px.width <= bw);
                prop_assert!(px.y + px.height <= bh);
            }
        }

        /// Property: With a clamped pan the crop needs at most rounding-level correction.
        #[test]
        fn prop_clamped_pan_crop_stays_in_image(
            (w, h) in (16.0f64..=3000.0, 16.0f64..=3000.0),
            zoom in 1.0f64..=4.0,
            (x, y) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let size = Size::new(w, h);
            let fit = compute_initial_fit(size, &viewport());
            let scale = fit.origin_scale * zoom;
            let pan = clamp_pan(PanOffset::new(x, y), scale, fit.origin_scale, size, &fit, 335.0);
            let rect = compute_crop_rect(size, Orientation::Up, pan, scale, fit.origin_scale, &fit, 335.0);

            let tolerance = 1e-6 * w.max(h);
            prop_assert!(rect.x >= -tolerance);
            prop_assert!(rect.y >= -tolerance);
            prop_assert!(rect.right() <= w + tolerance);
            prop_assert!(rect.bottom() <= h + tolerance);
        }
    }
}
