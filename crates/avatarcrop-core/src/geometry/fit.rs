//! Initial fit of a picked image into the square crop window.

use tracing::debug;

use super::{FitResult, Size, Viewport};

/// Fit `image_size` into the crop window so the shorter relative side covers it.
///
/// Portrait images pin their width to the window side, landscape (and square)
/// images pin their height. When the fitted pinned axis would still leave a gap
/// on the other axis, the image is fitted by its longer side instead, both
/// scales become `side / longer_side` and `display_size.width` is `0.0`.
///
/// A landscape fit wider than the physical screen is pre-zoomed: both scales
/// become `fitted_width / screen_width`.
///
/// # Preconditions
///
/// `image_size` must have both dimensions greater than zero. Callers that take
/// sizes from untrusted input should check [`Size::is_valid`] first.
pub fn compute_initial_fit(image_size: Size, viewport: &Viewport) -> FitResult {
    debug_assert!(image_size.is_valid(), "image size must be positive");

    let side = viewport.side;
    let mut scale = 1.0;

    let display_size = if image_size.width < image_size.height {
        let fit_height = image_size.height * (side / image_size.width);
        if fit_height < side {
            scale = side / image_size.height;
            Size::new(0.0, side)
        } else {
            Size::new(side, fit_height)
        }
    } else {
        let fit_width = image_size.width * (side / image_size.height);
        if fit_width < side {
            scale = side / image_size.width;
            Size::new(0.0, side)
        } else {
            if fit_width >= viewport.screen_width {
                scale = fit_width / viewport.screen_width;
            }
            Size::new(fit_width, side)
        }
    };

    let fit = FitResult {
        display_size,
        img_scale: scale,
        origin_scale: scale,
    };
    debug!(
        width = image_size.width,
        height = image_size.height,
        ?fit,
        "fitted image into crop window"
    );
    fit
}


// ============================================================================
// Property-Based Tests
// ============================================================================
