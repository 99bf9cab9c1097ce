//! Image orientation tags and the crop-origin remap they imply.
//!
//! Picked photos keep their pixel buffer in sensor order and carry an
//! orientation tag describing how to display it. The crop geometry works in
//! display coordinates, so the final rectangle has to be moved back into the
//! raw buffer's coordinate space before slicing.

use serde::{Deserialize, Serialize};

use crate::geometry::{CropRect, Size};

/// Display orientation of a bitmap, one case per EXIF orientation value (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Displayed as stored.
    #[default]
    Up = 1,
    /// Horizontal flip.
    UpMirrored = 2,
    /// Rotated 180 degrees.
    Down = 3,
    /// Vertical flip.
    DownMirrored = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    LeftMirrored = 5,
    /// Rotate 90 degrees clockwise to display.
    Right = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    RightMirrored = 7,
    /// Rotate 270 degrees clockwise (90 CCW) to display.
    Left = 8,
}

/// How a display-space crop origin maps into the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginRemap {
    /// Origin is already in buffer space.
    Identity,
    /// `x' = floor(H - h - y)`, `y' = x`.
    QuarterLeft,
    /// `x' = y`, `y' = floor(W - w - x)`.
    QuarterRight,
    /// `x' = floor(W - w - x)`, `y' = floor(H - h - y)`.
    HalfTurn,
}

impl Orientation {
    /// All eight orientations in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// The EXIF tag value for this orientation.
    pub fn exif_value(self) -> u32 {
        self as u32
    }

    /// Returns true if the raw buffer is stored with width and height swapped
    /// relative to the displayed image.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
        )
    }

    /// Size of the raw pixel buffer for an image displayed at `display`.
    pub fn raw_size(self, display: Size) -> Size {
        if self.swaps_dimensions() {
            Size::new(display.height, display.width)
        } else {
            display
        }
    }

    /// Remap table. Mirrored variants share the remap of their base rotation.
    pub const fn origin_remap(self) -> OriginRemap {
        match self {
            Orientation::Up | Orientation::UpMirrored => OriginRemap::Identity,
            Orientation::Left | Orientation::LeftMirrored => OriginRemap::QuarterLeft,
            Orientation::Right | Orientation::RightMirrored => OriginRemap::QuarterRight,
            Orientation::Down | Orientation::DownMirrored => OriginRemap::HalfTurn,
        }
    }

    /// Move the origin of a display-space rectangle into raw buffer space.
    ///
    /// `display` is the displayed (orientation-corrected) image size. Width
    /// and height of the rectangle are left untouched.
    pub fn remap_origin(self, rect: CropRect, display: Size) -> CropRect {
        self.origin_remap().apply(rect, display)
    }
}

impl OriginRemap {
    /// Apply this remap to `rect`.
    pub fn apply(self, rect: CropRect, display: Size) -> CropRect {
        let CropRect {
            x,
            y,
            width,
            height,
        } = rect;
        let (new_x, new_y) = match self {
            OriginRemap::Identity => (x, y),
            OriginRemap::QuarterLeft => ((display.height - height - y).floor(), x),
            OriginRemap::QuarterRight => (y, (display.width - width - x).floor()),
            OriginRemap::HalfTurn => (
                (display.width - width - x).floor(),
                (display.height - height - y).floor(),
            ),
        };
        CropRect {
            x: new_x,
            y: new_y,
            width,
            height,
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Up,
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            _ => Orientation::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, side: f64) -> CropRect {
        CropRect {
            x,
            y,
            width: side,
            height: side,
        }
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Up);
        assert_eq!(Orientation::from(6), Orientation::Right);
        assert_eq!(Orientation::from(8), Orientation::Left);
        assert_eq!(Orientation::from(99), Orientation::Up); // Invalid defaults to Up
    }

    #[test]
    fn test_exif_value_round_trips() {
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from(orientation.exif_value()), orientation);
        }
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(!Orientation::Up.swaps_dimensions());
        assert!(!Orientation::UpMirrored.swaps_dimensions());
        assert!(!Orientation::Down.swaps_dimensions());
        assert!(!Orientation::DownMirrored.swaps_dimensions());

        assert!(Orientation::Left.swaps_dimensions());
        assert!(Orientation::LeftMirrored.swaps_dimensions());
        assert!(Orientation::Right.swaps_dimensions());
        assert!(Orientation::RightMirrored.swaps_dimensions());
    }

    #[test]
    fn test_raw_size() {
        let display = Size::new(400.0, 800.0);
        assert_eq!(Orientation::Up.raw_size(display), display);
        assert_eq!(Orientation::Right.raw_size(display), Size::new(800.0, 400.0));
    }

    #[test]
    fn test_up_is_identity() {
        let display = Size::new(400.0, 800.0);
        let r = rect(10.5, 20.25, 100.0);
        assert_eq!(Orientation::Up.remap_origin(r, display), r);
        assert_eq!(Orientation::UpMirrored.remap_origin(r, display), r);
    }

    #[test]
    fn test_left_remap() {
        let display = Size::new(400.0, 800.0);
        let out = Orientation::Left.remap_origin(rect(0.0, 200.0, 400.0), display);
        assert_eq!(out, rect(200.0, 0.0, 400.0));
    }

    #[test]
    fn test_right_remap() {
        let display = Size::new(400.0, 800.0);
        let out = Orientation::Right.remap_origin(rect(0.0, 200.0, 400.0), display);
        assert_eq!(out, rect(200.0, 0.0, 400.0));

        let out = Orientation::RightMirrored.remap_origin(rect(30.0, 10.0, 100.0), display);
        // x' = y, y' = floor(400 - 100 - 30)
        assert_eq!(out, rect(10.0, 270.0, 100.0));
    }

    #[test]
    fn test_down_remap_floors() {
        let display = Size::new(500.0, 500.0);
        let out = Orientation::Down.remap_origin(rect(10.5, 20.5, 100.0), display);
        // floor(500 - 100 - 10.5) = 389, floor(500 - 100 - 20.5) = 379
        assert_eq!(out, rect(389.0, 379.0, 100.0));
        assert_eq!(
            Orientation::DownMirrored.remap_origin(rect(10.5, 20.5, 100.0), display),
            out
        );
    }

    #[test]
    fn test_mirrored_variants_share_base_remap() {
        assert_eq!(
            Orientation::LeftMirrored.origin_remap(),
            Orientation::Left.origin_remap()
        );
        assert_eq!(
            Orientation::RightMirrored.origin_remap(),
            Orientation::Right.origin_remap()
        );
    }
}
