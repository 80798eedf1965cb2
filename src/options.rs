//! Zoom configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;

/// Options read by a [`Target`](crate::Target) on every zoom.
///
/// Deserializes from camelCase keys; every field has a default, so a partial
/// record (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Added to the viewport-fill scale. `1.0` makes the image touch the
    /// nearer viewport edge.
    pub scale_base: f64,
    /// Extra scale added on top of the zoomed scale while the image is
    /// grabbed or moved, when the caller passes none of its own.
    pub scale_extra: f64,
    /// Explicit zoomed size, overriding viewport-fill scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_size: Option<Size>,
    /// Stacking order of the overlay; the zoomed element sits one above it.
    pub z_index: i32,
    /// Show a grab cursor while zoomed.
    pub enable_grab: bool,
    /// Transition duration in seconds.
    pub transition_duration: f64,
    /// CSS timing function for the zoom transition.
    pub transition_timing_function: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scale_base: 1.0,
            scale_extra: 0.5,
            custom_size: None,
            z_index: 998,
            enable_grab: true,
            transition_duration: 0.4,
            transition_timing_function: String::from("cubic-bezier(0.4, 0, 0, 1)"),
        }
    }
}

/// Invalid option value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("scaleBase must be finite, got {0}")]
    ScaleBase(f64),
    #[error("scaleExtra must be finite, got {0}")]
    ScaleExtra(f64),
    #[error("customSize must be finite and positive, got {width}x{height}")]
    CustomSize { width: f64, height: f64 },
    #[error("transitionDuration must be finite and non-negative, got {0}")]
    TransitionDuration(f64),
    #[error("transitionTimingFunction must not be empty")]
    TimingFunction,
}

impl Options {
    /// Check every field for values that would produce a broken transform
    /// or transition declaration.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.scale_base.is_finite() {
            return Err(OptionsError::ScaleBase(self.scale_base));
        }
        if !self.scale_extra.is_finite() {
            return Err(OptionsError::ScaleExtra(self.scale_extra));
        }
        if let Some(size) = self.custom_size
            && !(size.width.is_finite()
                && size.height.is_finite()
                && size.width > 0.0
                && size.height > 0.0)
        {
            return Err(OptionsError::CustomSize {
                width: size.width,
                height: size.height,
            });
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(OptionsError::TransitionDuration(self.transition_duration));
        }
        if self.transition_timing_function.trim().is_empty() {
            return Err(OptionsError::TimingFunction);
        }
        Ok(())
    }
}
