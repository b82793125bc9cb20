// SPDX-License-Identifier: MPL-2.0
//! Rotation angle for the lightbox image.
//!
//! Only quarter turns are allowed: 0°, 90°, 180° or 270°.

use crate::config::ROTATION_STEP_DEGREES;

/// Rotation angle in 90° increments.
///
/// # Example
///
/// ```
/// use estate_gallery::ui::state::RotationAngle;
///
/// let angle = RotationAngle::default().rotate_clockwise();
/// assert_eq!(angle.degrees(), 90);
///
/// let full = angle.rotate_clockwise().rotate_clockwise().rotate_clockwise();
/// assert_eq!(full.degrees(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    pub const ZERO: Self = Self(0);

    /// Creates an angle, rounding down to a quarter turn and wrapping at 360°.
    #[must_use]
    pub fn new(degrees: u16) -> Self {
        Self(((degrees / ROTATION_STEP_DEGREES) * ROTATION_STEP_DEGREES) % 360)
    }

    /// Angle in degrees, one of 0, 90, 180 or 270.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Adds 90 degrees, wrapping at 360.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        Self((self.0 + ROTATION_STEP_DEGREES) % 360)
    }

    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }

    /// True for 90° and 270°, where width and height trade places.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.0 == 90 || self.0 == 270
    }

    /// CSS-style transform fragment, e.g. `rotate(90deg)`.
    #[must_use]
    pub fn css(self) -> String {
        format!("rotate({}deg)", self.0)
    }
}
