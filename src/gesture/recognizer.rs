// SPDX-License-Identifier: MPL-2.0
//! Touch gesture classification.
//!
//! Feeds on raw touch start/move/end events and reports classified
//! [`Gesture`]s. It knows nothing about what a gesture will do; consumers
//! bind gestures to actions.

use crate::config::{DEFAULT_SWIPE_DISTANCE_PX, DEFAULT_SWIPE_VELOCITY_PX_PER_MS};
use crate::ui::geometry::{Point, Vector};
use std::time::Duration;

/// Raw touch input, with all touches currently on the surface.
///
/// `time` is the event timestamp relative to any fixed origin.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start { touches: Vec<Point>, time: Duration },
    Move { touches: Vec<Point>, time: Duration },
    /// `touches` holds the touches that remain after the lift.
    End { touches: Vec<Point>, time: Duration },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }
}

/// A classified gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Single-finger movement in progress.
    Drag { origin: Point, position: Point },
    /// Single-finger flick that passed a swipe threshold.
    Swipe {
        direction: SwipeDirection,
        /// Travel along the dominant axis, in pixels.
        distance: f32,
        /// Speed along the dominant axis, in px/ms.
        velocity: f32,
    },
    /// Second finger landed.
    PinchStart { center: Point },
    /// Two-finger spread relative to the distance at pinch start.
    Pinch { scale: f32, center: Point },
    PinchEnd { scale: f32 },
}

/// Distance and velocity thresholds for swipes. Either one suffices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    pub distance_px: f32,
    pub velocity_px_per_ms: f32,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance_px: DEFAULT_SWIPE_DISTANCE_PX,
            velocity_px_per_ms: DEFAULT_SWIPE_VELOCITY_PX_PER_MS,
        }
    }
}

/// Pinch spreads smaller than this are ignored when measuring scale.
const MIN_PINCH_SPAN_PX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Tracking {
        origin: Point,
        started: Duration,
        last: Point,
    },
    Pinching {
        initial_span: f32,
        scale: f32,
    },
    /// A pinch ended with a finger still down. Nothing is reported until
    /// every finger lifts.
    Settling,
}

/// Stateful classifier for one touch surface.
#[derive(Debug, Clone, Default)]
pub struct TouchGestureRecognizer {
    thresholds: SwipeThresholds,
    phase: Phase,
}

impl TouchGestureRecognizer {
    /// A recognizer classifying swipes with `thresholds`.
    #[must_use]
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> SwipeThresholds {
        self.thresholds
    }

    /// Whether no finger is being tracked.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Feeds one event. Returns the gesture it completes or advances, if any.
    pub fn handle(&mut self, event: &TouchEvent) -> Option<Gesture> {
        match event {
            TouchEvent::Start { touches, time } => self.on_start(touches, *time),
            TouchEvent::Move { touches, .. } => self.on_move(touches),
            TouchEvent::End { touches, time } => self.on_end(touches, *time),
            TouchEvent::Cancel => {
                self.phase = Phase::Idle;
                None
            }
        }
    }

    fn on_start(&mut self, touches: &[Point], time: Duration) -> Option<Gesture> {
        match touches {
            [single] => {
                if matches!(self.phase, Phase::Idle) {
                    self.phase = Phase::Tracking {
                        origin: *single,
                        started: time,
                        last: *single,
                    };
                }
                None
            }
            [a, b, ..] => {
                let span = a.distance(*b);
                self.phase = Phase::Pinching {
                    initial_span: span.max(MIN_PINCH_SPAN_PX),
                    scale: 1.0,
                };
                Some(Gesture::PinchStart {
                    center: a.midpoint(*b),
                })
            }
            [] => None,
        }
    }

    fn on_move(&mut self, touches: &[Point]) -> Option<Gesture> {
        match (&mut self.phase, touches) {
            (Phase::Tracking { origin, last, .. }, [position]) => {
                *last = *position;
                Some(Gesture::Drag {
                    origin: *origin,
                    position: *position,
                })
            }
            (Phase::Pinching { initial_span, scale }, [a, b, ..]) => {
                *scale = a.distance(*b).max(MIN_PINCH_SPAN_PX) / *initial_span;
                Some(Gesture::Pinch {
                    scale: *scale,
                    center: a.midpoint(*b),
                })
            }
            _ => None,
        }
    }

    fn on_end(&mut self, remaining: &[Point], time: Duration) -> Option<Gesture> {
        match self.phase {
            Phase::Tracking {
                origin,
                started,
                last,
            } => {
                self.phase = Phase::Idle;
                self.classify_swipe(last - origin, time.saturating_sub(started))
            }
            Phase::Pinching { scale, .. } => {
                self.phase = if remaining.is_empty() {
                    Phase::Idle
                } else {
                    Phase::Settling
                };
                Some(Gesture::PinchEnd { scale })
            }
            Phase::Settling => {
                if remaining.is_empty() {
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::Idle => None,
        }
    }

    fn classify_swipe(&self, travel: Vector, elapsed: Duration) -> Option<Gesture> {
        let horizontal = travel.x.abs() >= travel.y.abs();
        let (distance, direction) = if horizontal {
            let direction = if travel.x < 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            };
            (travel.x.abs(), direction)
        } else {
            let direction = if travel.y < 0.0 {
                SwipeDirection::Up
            } else {
                SwipeDirection::Down
            };
            (travel.y.abs(), direction)
        };

        // Sub-millisecond taps count as one millisecond so velocity stays finite.
        let elapsed_ms = (elapsed.as_secs_f32() * 1000.0).max(1.0);
        let velocity = distance / elapsed_ms;

        let passes = distance > self.thresholds.distance_px
            || velocity > self.thresholds.velocity_px_per_ms;
        if distance > 0.0 && passes {
            Some(Gesture::Swipe {
                direction,
                distance,
                velocity,
            })
        } else {
            None
        }
    }
}
