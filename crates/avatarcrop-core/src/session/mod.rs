//! Avatar editing session.
//!
//! Owns the picked image, its fit, the committed pan/zoom and the live
//! gesture, and moves through these phases:
//!
//! ```text
//! NoImage -> ImageLoaded -> Adjusting -> Confirmed -> NoImage
//!                               ^            |
//!                               +-- failed --+
//! ```
//!
//! `cancel` returns to `NoImage` from any phase.

mod gesture;
mod task;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, CropperConfig};
use crate::decode::{Bitmap, PickedImage, PickerOutcome};
use crate::geometry::{compute_crop_rect, compute_initial_fit, CropRect, FitResult, PanOffset, Size, Viewport};
use crate::transform::CropError;

pub use gesture::{commit, CommittedTransform, GestureState, GestureValue, PanLimits};
#[cfg(feature = "async")]
pub use task::crop_in_background;
pub use task::CropRequest;

/// Errors reported by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No image has been loaded")]
    NoImage,

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: f64, height: f64 },

    #[error("A crop is already in progress")]
    CropInFlight,

    /// A crop result arrived after the session was cancelled or reloaded.
    #[error("Crop result no longer matches the session")]
    StaleResult,

    #[error(transparent)]
    Crop(#[from] CropError),
}

/// Where the session is in the pick, adjust, confirm cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NoImage,
    ImageLoaded,
    Adjusting,
    Confirmed,
}

/// What to draw for the image right now, committed transform plus live gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveTransform {
    pub scale: f64,
    pub offset: PanOffset,
    pub display_size: Size,
}

#[derive(Debug)]
struct LoadedImage {
    image: Arc<PickedImage>,
    limits: PanLimits,
    committed: CommittedTransform,
}

/// One avatar editing session.
#[derive(Debug)]
pub struct AvatarSession {
    config: CropperConfig,
    viewport: Viewport,
    phase: Phase,
    loaded: Option<LoadedImage>,
    gesture: GestureValue,
    busy: bool,
    /// Bumped whenever the loaded image goes away, so late crop results can
    /// be matched against the request that produced them.
    generation: u64,
}

impl AvatarSession {
    /// Create a session for the given device metrics.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidViewport` if the metrics leave no room
    /// for a crop window.
    pub fn new(config: CropperConfig) -> Result<Self, ConfigError> {
        let viewport = config.viewport()?;
        Ok(Self {
            config,
            viewport,
            phase: Phase::NoImage,
            loaded: None,
            gesture: GestureValue::default(),
            busy: false,
            generation: 0,
        })
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fit of the loaded image.
    pub fn fit(&self) -> Option<FitResult> {
        self.loaded.as_ref().map(|l| l.limits.fit)
    }

    /// Committed zoom and pan of the loaded image.
    pub fn committed(&self) -> Option<CommittedTransform> {
        self.loaded.as_ref().map(|l| l.committed)
    }

    pub fn image(&self) -> Option<&PickedImage> {
        self.loaded.as_ref().map(|l| l.image.as_ref())
    }

    pub fn gesture(&self) -> GestureState {
        GestureState::from(self.gesture)
    }

    /// Confirm is offered once an image is loaded and no crop is running.
    pub fn is_confirm_enabled(&self) -> bool {
        self.loaded.is_some() && !self.busy
    }

    /// Handle what the picker returned. Cancelling the picker is not an error.
    pub fn handle_picker(&mut self, outcome: PickerOutcome) -> Result<Option<FitResult>, SessionError> {
        match outcome {
            PickerOutcome::Picked(image) => self.load_image(image).map(Some),
            PickerOutcome::Cancelled => {
                debug!("picker cancelled");
                self.cancel();
                Ok(None)
            }
        }
    }

    /// Load a new image, replacing any previous one, and fit it.
    ///
    /// Pan, zoom and gesture state are reset.
    pub fn load_image(&mut self, image: PickedImage) -> Result<FitResult, SessionError> {
        let image_size = image.display_size();
        if !image_size.is_valid() {
            return Err(SessionError::EmptyImage {
                width: image_size.width,
                height: image_size.height,
            });
        }

        let fit = compute_initial_fit(image_size, &self.viewport);
        self.loaded = Some(LoadedImage {
            image: Arc::new(image),
            limits: PanLimits {
                image_size,
                fit,
                viewport_side: self.viewport.side,
            },
            committed: CommittedTransform {
                img_scale: fit.img_scale,
                pan: PanOffset::default(),
            },
        });
        self.gesture = GestureValue::default();
        self.busy = false;
        self.generation += 1;
        self.phase = Phase::ImageLoaded;

        info!(
            width = image_size.width,
            height = image_size.height,
            scale = fit.img_scale,
            "loaded image"
        );
        Ok(fit)
    }

    fn adjustable(&mut self) -> Result<(), SessionError> {
        if self.loaded.is_none() {
            return Err(SessionError::NoImage);
        }
        if self.busy {
            return Err(SessionError::CropInFlight);
        }
        self.phase = Phase::Adjusting;
        Ok(())
    }

    /// Record the live pinch factor of the current gesture.
    pub fn update_scale(&mut self, factor: f64) -> Result<(), SessionError> {
        self.adjustable()?;
        self.gesture.scale = Some(factor);
        Ok(())
    }

    /// Record the live drag translation of the current gesture.
    pub fn update_drag(&mut self, translation: PanOffset) -> Result<(), SessionError> {
        self.adjustable()?;
        self.gesture.translation = Some(translation);
        Ok(())
    }

    /// Commit the current gesture. Returns the new committed transform.
    pub fn end_gesture(&mut self) -> Result<CommittedTransform, SessionError> {
        self.adjustable()?;
        let value = std::mem::take(&mut self.gesture);
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoImage)?;

        loaded.committed = commit(loaded.committed, value, &loaded.limits);
        debug!(committed = ?loaded.committed, "gesture committed");
        Ok(loaded.committed)
    }

    /// Drop the current gesture without committing it.
    pub fn cancel_gesture(&mut self) {
        self.gesture = GestureValue::default();
    }

    /// Transform to render: committed scale times the live pinch factor, and
    /// committed pan plus the live translation.
    pub fn live_transform(&self) -> Option<LiveTransform> {
        let loaded = self.loaded.as_ref()?;
        let live = self.gesture();
        let translation = live.translation();
        Some(LiveTransform {
            scale: loaded.committed.img_scale * live.scale(),
            offset: loaded.committed.pan.translated(translation.x, translation.y),
            display_size: loaded.limits.fit.display_size,
        })
    }

    /// Source rectangle for the committed transform, in raw buffer coordinates.
    pub fn crop_rect(&self) -> Result<CropRect, SessionError> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoImage)?;
        let limits = &loaded.limits;
        Ok(compute_crop_rect(
            limits.image_size,
            loaded.image.orientation(),
            loaded.committed.pan,
            loaded.committed.img_scale,
            limits.fit.origin_scale,
            &limits.fit,
            limits.viewport_side,
        ))
    }

    /// Start the crop. The session stays busy until [`finish_crop`] is called
    /// with the request's result.
    ///
    /// [`finish_crop`]: AvatarSession::finish_crop
    pub fn confirm(&mut self) -> Result<CropRequest, SessionError> {
        if self.busy {
            return Err(SessionError::CropInFlight);
        }
        let rect = self.crop_rect()?;
        let image = self
            .loaded
            .as_ref()
            .map(|l| Arc::clone(&l.image))
            .ok_or(SessionError::NoImage)?;

        self.gesture = GestureValue::default();
        self.busy = true;
        self.phase = Phase::Confirmed;
        debug!(?rect, "confirm");

        Ok(CropRequest {
            image,
            rect,
            output_size: self.config.output_size,
            filter: self.config.filter,
            generation: self.generation,
        })
    }

    /// Deliver the result of the request returned by [`confirm`], together
    /// with that request's `generation`.
    ///
    /// Results from a request issued before the last `cancel` or `load_image`
    /// are refused with `SessionError::StaleResult` and leave the session
    /// untouched. On success the session resets to `NoImage` and hands back the avatar.
    /// On failure it returns to `Adjusting` with confirm enabled again.
    ///
    /// [`confirm`]: AvatarSession::confirm
    pub fn finish_crop(
        &mut self,
        generation: u64,
        result: Result<Bitmap, CropError>,
    ) -> Result<Bitmap, SessionError> {
        if generation != self.generation || !self.busy || self.phase != Phase::Confirmed {
            warn!(
                generation,
                current = self.generation,
                "discarding crop result for a reset session"
            );
            return Err(SessionError::StaleResult);
        }
        self.busy = false;

        match result {
            Ok(avatar) => {
                self.reset();
                Ok(avatar)
            }
            Err(e) => {
                warn!(error = %e, "crop failed");
                self.phase = Phase::Adjusting;
                Err(e.into())
            }
        }
    }

    /// Confirm and run the crop on the blocking pool.
    #[cfg(feature = "async")]
    pub async fn confirm_in_background(&mut self) -> Result<Bitmap, SessionError> {
        let request = self.confirm()?;
        let generation = request.generation;
        let result = crop_in_background(request).await;
        self.finish_crop(generation, result)
    }

    /// Abandon the session. Any outstanding crop result will be discarded.
    pub fn cancel(&mut self) {
        debug!(phase = ?self.phase, "session cancelled");
        self.reset();
    }

    fn reset(&mut self) {
        self.loaded = None;
        self.gesture = GestureValue::default();
        self.busy = false;
        self.generation += 1;
        self.phase = Phase::NoImage;
    }
}
