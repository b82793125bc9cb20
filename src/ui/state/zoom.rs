// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! Handles the lightbox zoom factor:
//! - Step zoom in/out from buttons and keys
//! - Pinch zoom relative to the factor at pinch start
//! - Reset to the default factor

pub use crate::config::{DEFAULT_ZOOM, DEFAULT_ZOOM_STEP, MAX_ZOOM, MIN_ZOOM};

/// Zoom factor, guaranteed to be within valid range (0.5×–3×).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self::default()
        }
    }

    /// Zoom as a multiplier, 1.0 being actual size.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the factor as a whole percentage (e.g., 1.5 → 150).
    #[must_use]
    pub fn as_percent(self) -> u16 {
        // Bounded by MAX_ZOOM, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.0 * 100.0).round() as u16;
        percent
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM
    }

    /// Returns true when the image is enlarged beyond its fitted size.
    #[must_use]
    pub fn is_magnified(self) -> bool {
        self.0 > DEFAULT_ZOOM
    }

    /// One `step` larger, clamped.
    #[must_use]
    pub fn zoom_in(self, step: f32) -> Self {
        Self::new(self.0 + step)
    }

    /// One `step` smaller, clamped.
    #[must_use]
    pub fn zoom_out(self, step: f32) -> Self {
        Self::new(self.0 - step)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

/// Manages zoom for the lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    pub factor: ZoomFactor,
    pub step: f32,
    /// Factor captured when the current pinch began.
    pinch_base: Option<ZoomFactor>,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::with_step(DEFAULT_ZOOM_STEP)
    }
}

impl ZoomState {
    /// Actual size with a custom button step.
    #[must_use]
    pub fn with_step(step: f32) -> Self {
        Self {
            factor: ZoomFactor::default(),
            step: if step.is_finite() && step > 0.0 {
                step
            } else {
                DEFAULT_ZOOM_STEP
            },
            pinch_base: None,
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.factor = self.factor.zoom_in(self.step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.factor = self.factor.zoom_out(self.step);
    }

    /// Resets the factor and abandons any pinch in progress.
    pub fn reset(&mut self) {
        self.factor = ZoomFactor::default();
        self.pinch_base = None;
    }

    /// Remembers the factor a pinch multiplies.
    pub fn begin_pinch(&mut self) {
        self.pinch_base = Some(self.factor);
    }

    /// Applies a pinch `scale` relative to the factor at pinch start.
    pub fn apply_pinch(&mut self, scale: f32) {
        let base = *self.pinch_base.get_or_insert(self.factor);
        self.factor = ZoomFactor::new(base.value() * scale);
    }

    /// Ends the pinch, keeping the reached factor.
    pub fn end_pinch(&mut self) {
        self.pinch_base = None;
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_base.is_some()
    }
}
