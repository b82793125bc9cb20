// SPDX-License-Identifier: MPL-2.0
//! Presentation-independent view primitives.
//!
//! - [`geometry`] - Points, vectors and rectangles in CSS pixels
//! - [`state`] - Zoom, rotation and drag state for the lightbox

pub mod geometry;
pub mod state;
