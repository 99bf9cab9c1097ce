//! Crop window overlay geometry.
//!
//! Positions of the dimmed mask cut-out and the rule-of-thirds guides,
//! computed in container coordinates. Drawing is left to the presentation
//! layer.

use serde::{Deserialize, Serialize};

use crate::geometry::{CropRect, Size};
use crate::session::GestureState;

/// Opacity of the mask outside the crop window while the image is at rest.
pub const DIM_OPACITY: f64 = 0.6;

/// A straight guide line from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// The crop window inside a container of the given size.
///
/// Horizontally inset by `margin`, vertically centred.
pub fn crop_window_frame(container: Size, margin: f64, side: f64) -> CropRect {
    CropRect::new(margin, (container.height - side) / 2.0, side, side)
}

/// Rule-of-thirds grid over `frame`, including its border.
///
/// Returns four horizontal lines followed by four vertical lines.
pub fn guide_lines(frame: CropRect) -> Vec<GuideLine> {
    let step_y = frame.height / 3.0;
    let step_x = frame.width / 3.0;

    let horizontal = (0..4).map(|i| {
        let y = frame.y + i as f64 * step_y;
        GuideLine {
            start: (frame.x, y),
            end: (frame.right(), y),
        }
    });
    let vertical = (0..4).map(|i| {
        let x = frame.x + i as f64 * step_x;
        GuideLine {
            start: (x, frame.y),
            end: (x, frame.bottom()),
        }
    });

    horizontal.chain(vertical).collect()
}

/// The mask fades out while dragging so the whole photo is visible.
pub fn dim_opacity(gesture: &GestureState) -> f64 {
    if gesture.is_dragging() {
        0.0
    } else {
        DIM_OPACITY
    }
}
