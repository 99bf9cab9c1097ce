//! Pan clamping so the crop window never shows empty space.

use tracing::debug;

use super::{FitResult, PanOffset, PinnedAxis, Size};

/// Legal pan range at a given zoom.
///
/// `left`/`top` are the largest offsets, `right`/`bottom` their negatives.
/// When the zoomed image is still smaller than the window on an axis, `left`
/// (or `top`) is negative and the range collapses onto that value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl OffsetBounds {
    /// Bounds for the image zoomed to `img_scale`.
    pub fn compute(
        image_size: Size,
        fit: &FitResult,
        img_scale: f64,
        origin_scale: f64,
        viewport_side: f64,
    ) -> Self {
        let (width, height) = effective_size(image_size, fit, img_scale, origin_scale, viewport_side);
        let left = (width - viewport_side) / 2.0;
        let top = (height - viewport_side) / 2.0;
        Self {
            left,
            right: -left,
            top,
            bottom: -top,
        }
    }

    /// Clamp `pan` into these bounds.
    pub fn clamp(&self, pan: PanOffset) -> PanOffset {
        PanOffset {
            x: clamp_axis(pan.x, self.left, self.right),
            y: clamp_axis(pan.y, self.top, self.bottom),
        }
    }
}

/// Zoomed on-screen size of the image.
pub(crate) fn effective_size(
    image_size: Size,
    fit: &FitResult,
    img_scale: f64,
    origin_scale: f64,
    viewport_side: f64,
) -> (f64, f64) {
    match fit.pinned_axis(viewport_side) {
        PinnedAxis::Width => {
            let fit_scale = viewport_side / image_size.width;
            (
                viewport_side * img_scale / origin_scale,
                image_size.height * fit_scale * img_scale,
            )
        }
        PinnedAxis::Height => {
            let fit_scale = viewport_side / image_size.height;
            (
                image_size.width * fit_scale * img_scale / origin_scale,
                viewport_side * img_scale / origin_scale,
            )
        }
    }
}

// Upper bound wins: with a negative `max` the value always lands on `max`.
fn clamp_axis(value: f64, max: f64, min: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp a candidate pan against the bounds for the current zoom.
///
/// `pan` is the last committed pan plus the finished gesture's translation.
/// The scale itself is not validated; the caller keeps `img_scale` at or
/// above `origin_scale`.
pub fn clamp_pan(
    pan: PanOffset,
    img_scale: f64,
    origin_scale: f64,
    image_size: Size,
    fit: &FitResult,
    viewport_side: f64,
) -> PanOffset {
    let bounds = OffsetBounds::compute(image_size, fit, img_scale, origin_scale, viewport_side);
    let clamped = bounds.clamp(pan);
    debug!(
        left = bounds.left,
        top = bounds.top,
        ?pan,
        ?clamped,
        "clamped pan"
    );
    clamped
}


// ============================================================================
// Property-Based Tests
// ============================================================================
