// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and gallery fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::domain::gallery::{GalleryMediaItem, LightboxImage, TabItem};

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

/// The two-tab fixture used across navigation tests.
#[must_use]
pub fn sample_tabs() -> Vec<TabItem> {
    vec![
        TabItem::new(1, "Dış Mekan", 24)
            .with_sub_tabs(vec![TabItem::new(11, "Cephe", 14), TabItem::new(12, "Peyzaj", 10)]),
        TabItem::new(2, "İç Mekan", 10),
    ]
}

/// `count` image entries with ids starting at `first_id`.
#[must_use]
pub fn media_items(first_id: u64, count: u64) -> Vec<GalleryMediaItem> {
    (first_id..first_id + count)
        .map(|id| GalleryMediaItem::image(id, format!("Görsel {id}"), format!("/uploads/{id}.jpg")))
        .collect()
}

/// `count` lightbox images.
#[must_use]
pub fn lightbox_images(count: u64) -> Vec<LightboxImage> {
    media_items(1, count).iter().map(LightboxImage::from).collect()
}
