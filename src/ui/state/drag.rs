// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Grab-and-drag panning of a magnified image.

use crate::ui::geometry::{Point, Vector};

/// Manages grab-and-drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,

    /// Pointer position where the drag started
    pub start_position: Option<Point>,

    /// Pan offset when the drag started
    pub start_offset: Option<Vector>,
}

impl DragState {
    /// Starts a drag at `position` with the image currently at `offset`.
    pub fn start(&mut self, position: Point, offset: Vector) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.start_offset = Some(offset);
    }

    /// Ends the drag and forgets its origin.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Pan offset for the current pointer position. The image follows the
    /// pointer.
    #[must_use]
    pub fn calculate_offset(&self, current_position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }
        let start_position = self.start_position?;
        let start_offset = self.start_offset?;
        Some(start_offset + (current_position - start_position))
    }
}
