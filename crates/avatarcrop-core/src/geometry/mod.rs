//! Crop geometry: fitting, pan clamping and crop-rectangle conversion.
//!
//! The picker shows the photo behind a fixed square crop window. Three pure
//! operations turn the user's pan/zoom into source pixels:
//!
//! 1. [`compute_initial_fit`] - once per loaded image, pins one axis of the
//!    image to the window side.
//! 2. [`clamp_pan`] - on every committed gesture, keeps the window covered.
//! 3. [`compute_crop_rect`] - on confirm, maps the window into the source
//!    pixel buffer.
//!
//! # Coordinate System
//!
//! - Pan offsets are in on-screen points, relative to the centred position
//! - Positive x moves the image right, positive y moves it down
//! - Crop rectangles are in source pixels, origin top-left

mod crop_rect;
mod fit;
mod pan;

use serde::{Deserialize, Serialize};

pub use crop_rect::{compute_crop_rect, nominal_crop_window, PixelRect};
pub use fit::compute_initial_fit;
pub use pan::{clamp_pan, OffsetBounds};

/// A width/height pair in points or pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pan offset of the image relative to its centred position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

impl PanOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset translated by a gesture delta.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Device metrics the fit depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Side of the square crop window in points.
    pub side: f64,
    /// Full display width in points.
    pub screen_width: f64,
    /// Full display height in points.
    pub screen_height: f64,
}

/// Which image axis is locked to the crop window side after fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinnedAxis {
    Width,
    Height,
}

/// Result of fitting an image into the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// On-screen size before any user zoom. A width of `0.0` marks the
    /// degenerate case where the height is pinned and the width overflows.
    pub display_size: Size,
    /// Initial zoom scale.
    pub img_scale: f64,
    /// Zoom baseline. Never changes after fitting.
    pub origin_scale: f64,
}

impl FitResult {
    /// Width is pinned exactly when the displayed width equals the window side.
    pub fn pinned_axis(&self, viewport_side: f64) -> PinnedAxis {
        if self.display_size.width == viewport_side {
            PinnedAxis::Width
        } else {
            PinnedAxis::Height
        }
    }
}

/// Axis-aligned rectangle with floating point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Uniformly scale origin and size about (0, 0).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Shrink and shift the rectangle until it fits inside `bounds`.
    ///
    /// Size is capped first, then the origin is pushed back inside, so a
    /// rectangle that drifted out by rounding keeps its size.
    pub fn clamped_to(self, bounds: Size) -> Self {
        let width = self.width.clamp(0.0, bounds.width);
        let height = self.height.clamp(0.0, bounds.height);
        let x = self.x.clamp(0.0, bounds.width - width);
        let y = self.y.clamp(0.0, bounds.height - height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
