// SPDX-License-Identifier: MPL-2.0
//! Viewer state primitives shared by the lightbox.

pub mod drag;
pub mod rotation;
pub mod zoom;

pub use drag::DragState;
pub use rotation::RotationAngle;
pub use zoom::{ZoomFactor, ZoomState};
