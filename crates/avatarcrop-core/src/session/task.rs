//! The single-shot crop job started on confirm.

use std::sync::Arc;

use crate::decode::{resize_to_side, Bitmap, FilterType, PickedImage};
use crate::geometry::{CropRect, PixelRect};
use crate::transform::{crop_bitmap, to_upright, CropError};

/// Everything needed to produce the avatar, detached from the session.
#[derive(Debug, Clone)]
pub struct CropRequest {
    pub image: Arc<PickedImage>,
    /// Source rectangle in raw buffer coordinates.
    pub rect: CropRect,
    pub output_size: Option<u32>,
    pub filter: FilterType,
    /// Session generation the request was issued in.
    pub generation: u64,
}

impl CropRequest {
    /// Crop the raw buffer, turn the region upright and resize it.
    ///
    /// # Errors
    ///
    /// Returns `CropError::EmptyRegion` if the rectangle misses the buffer
    /// entirely, or the underlying pixel error.
    pub fn execute(&self) -> Result<Bitmap, CropError> {
        let raw = self.image.bitmap();
        let region = PixelRect::from_rect(self.rect, raw.width, raw.height).ok_or(
            CropError::EmptyRegion {
                rect: self.rect,
                buffer_width: raw.width,
                buffer_height: raw.height,
            },
        )?;

        let cropped = crop_bitmap(raw, region)?;
        let upright = to_upright(&cropped, self.image.orientation())?;
        let avatar = match self.output_size {
            Some(side) => resize_to_side(&upright, side, self.filter)?,
            None => upright,
        };

        tracing::info!(
            %region,
            orientation = ?self.image.orientation(),
            width = avatar.width,
            height = avatar.height,
            "cropped avatar"
        );
        Ok(avatar)
    }
}

/// Run `request` on the blocking pool.
///
/// Resolves exactly once. A panicking crop surfaces as `CropError::TaskFailed`.
#[cfg(feature = "async")]
pub async fn crop_in_background(request: CropRequest) -> Result<Bitmap, CropError> {
    tokio::task::spawn_blocking(move || request.execute())
        .await
        .map_err(|e| CropError::TaskFailed(e.to_string()))?
}
