// SPDX-License-Identifier: MPL-2.0
//! Touch gestures and scoped input listeners.

pub mod listener;
pub mod recognizer;

pub use listener::{ListenerRegistry, Subscription};
pub use recognizer::{Gesture, SwipeDirection, SwipeThresholds, TouchEvent, TouchGestureRecognizer};

use crate::config::LightboxConfig;

impl From<&LightboxConfig> for SwipeThresholds {
    fn from(config: &LightboxConfig) -> Self {
        Self {
            distance_px: config.swipe_distance_px,
            velocity_px_per_ms: config.swipe_velocity_px_per_ms,
        }
    }
}
