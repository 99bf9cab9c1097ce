//! Live pinch and drag state.
//!
//! The recogniser reports a pinch factor and a drag translation relative to
//! the start of the gesture, possibly both at once. Neither touches the
//! committed transform until the gesture ends.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_pan, FitResult, PanOffset, Size};

/// Raw values of a simultaneous pinch + drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureValue {
    /// Pinch factor relative to the scale at gesture start.
    pub scale: Option<f64>,
    /// Drag translation in on-screen points.
    pub translation: Option<PanOffset>,
}

/// What the gesture is currently doing, as shown on screen.
///
/// When pinch and drag run together the drag wins, so the live preview shows
/// the translation at the committed scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Inactive,
    Scaling(f64),
    Dragging(PanOffset),
}

impl From<GestureValue> for GestureState {
    fn from(value: GestureValue) -> Self {
        match (value.scale, value.translation) {
            (_, Some(translation)) => GestureState::Dragging(translation),
            (Some(scale), None) => GestureState::Scaling(scale),
            (None, None) => GestureState::Inactive,
        }
    }
}

impl GestureState {
    /// Live pinch factor, `1.0` unless scaling.
    pub fn scale(&self) -> f64 {
        match self {
            GestureState::Scaling(scale) => *scale,
            _ => 1.0,
        }
    }

    /// Live translation, zero unless dragging.
    pub fn translation(&self) -> PanOffset {
        match self {
            GestureState::Dragging(translation) => *translation,
            _ => PanOffset::default(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }
}

/// The committed zoom and pan of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommittedTransform {
    pub img_scale: f64,
    pub pan: PanOffset,
}

/// Everything the pan bounds depend on besides the transform itself.
#[derive(Debug, Clone, Copy)]
pub struct PanLimits {
    pub image_size: Size,
    pub fit: FitResult,
    pub viewport_side: f64,
}

impl PanLimits {
    fn clamp(&self, pan: PanOffset, img_scale: f64) -> PanOffset {
        clamp_pan(
            pan,
            img_scale,
            self.fit.origin_scale,
            self.image_size,
            &self.fit,
            self.viewport_side,
        )
    }
}

/// Fold a finished gesture into the committed transform.
///
/// The pinch is applied first: the new scale is floored at the fit scale and
/// the pan is re-clamped for it. The drag translation is then added to that
/// pan and clamped again.
pub fn commit(
    committed: CommittedTransform,
    value: GestureValue,
    limits: &PanLimits,
) -> CommittedTransform {
    let mut next = committed;

    if let Some(factor) = value.scale.filter(|f| f.is_finite() && *f > 0.0) {
        next.img_scale = (committed.img_scale * factor).max(limits.fit.origin_scale);
        next.pan = limits.clamp(next.pan, next.img_scale);
    }

    if let Some(translation) = value.translation {
        let candidate = next.pan.translated(translation.x, translation.y);
        next.pan = limits.clamp(candidate, next.img_scale);
    }

    next
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{compute_initial_fit, OffsetBounds, Viewport};
    use proptest::prelude::*;

    proptest! {
        /// Property: A committed transform never zooms out past the fit and
        /// never leaves its pan bounds.
        #[test]
        fn prop_commit_stays_valid(
            width in 50.0f64..4000.0,
            height in 50.0f64..4000.0,
            factors in prop::collection::vec(0.2f64..4.0, 1..6),
            dx in -2000.0f64..2000.0,
            dy in -2000.0f64..2000.0,
        ) {
            let viewport = Viewport { side: 335.0, screen_width: 375.0, screen_height: 667.0 };
            let image_size = Size::new(width, height);
            let fit = compute_initial_fit(image_size, &viewport);
            let limits = PanLimits { image_size, fit, viewport_side: 335.0 };

            let mut committed = CommittedTransform { img_scale: fit.img_scale, pan: PanOffset::default() };
            for factor in factors {
                let value = GestureValue {
                    scale: Some(factor),
                    translation: Some(PanOffset::new(dx, dy)),
                };
                committed = commit(committed, value, &limits);

                prop_assert!(committed.img_scale >= fit.origin_scale);
                let bounds = OffsetBounds::compute(image_size, &fit, committed.img_scale, fit.origin_scale, 335.0);
                prop_assert_eq!(bounds.clamp(committed.pan), committed.pan);
            }
        }
    }
}
