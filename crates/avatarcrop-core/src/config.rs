//! Cropper configuration.
//!
//! Device metrics and output settings, loadable from a TOML file. Every field
//! has a default so a partial file (or none at all) is valid:
//!
//! ```toml
//! screen_width = 390
//! screen_height = 844
//! top_spacing = 54
//! output_size = 512
//! filter = "lanczos3"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::geometry::{Size, Viewport};

pub const DEFAULT_SCREEN_WIDTH: f64 = 375.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 667.0;
pub const DEFAULT_MARGIN: f64 = 20.0;
/// Space reserved above the container on devices without a safe-area inset.
pub const DEFAULT_TOP_SPACING: f64 = 40.0;
/// Space reserved above the container on devices with a safe-area inset.
pub const SAFE_AREA_TOP_SPACING: f64 = 54.0;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The margins leave no room for a crop window.
    #[error("Invalid viewport: {screen_width}x{screen_height} screen with margin {margin}")]
    InvalidViewport {
        screen_width: f64,
        screen_height: f64,
        margin: f64,
    },
}

/// Settings for one cropper instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Screen width in points.
    pub screen_width: f64,
    /// Screen height in points.
    pub screen_height: f64,
    /// Horizontal margin on each side of the crop window.
    pub margin: f64,
    /// Vertical space taken above the cropper container.
    pub top_spacing: f64,
    /// Edge of the final square avatar in pixels. `None` keeps the source
    /// resolution of the cropped region.
    pub output_size: Option<u32>,
    /// Filter used when resizing to `output_size`.
    pub filter: FilterType,
    /// JPEG quality for exported avatars.
    pub jpeg_quality: u8,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            margin: DEFAULT_MARGIN,
            top_spacing: DEFAULT_TOP_SPACING,
            output_size: None,
            filter: FilterType::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CropperConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded cropper config");
        Ok(config)
    }

    /// Side of the square crop window: `screen_width - 2 * margin`.
    pub fn viewport_side(&self) -> f64 {
        self.screen_width - 2.0 * self.margin
    }

    /// Validate the device metrics and derive the crop viewport.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidViewport` if the window side would not be
    /// positive or the window would not fit vertically.
    pub fn viewport(&self) -> Result<Viewport, ConfigError> {
        let side = self.viewport_side();
        let finite = [self.screen_width, self.screen_height, self.margin]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.margin < 0.0 || side <= 0.0 || side > self.container_size().height {
            return Err(ConfigError::InvalidViewport {
                screen_width: self.screen_width,
                screen_height: self.screen_height,
                margin: self.margin,
            });
        }

        Ok(Viewport {
            side,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        })
    }

    /// Size of the area the image and overlay are laid out in.
    pub fn container_size(&self) -> Size {
        Size::new(self.screen_width, self.screen_height - self.top_spacing)
    }
}
