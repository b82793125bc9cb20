// SPDX-License-Identifier: MPL-2.0
//! Facet filters for gallery media.
//!
//! A missing key means "no constraint". Items that lack the field a
//! constraint looks at (no `category`, no `created_at`) are kept: the API
//! does not always send these fields and an unknown value is not a mismatch.
//!
//! # Available Filters
//!
//! - [`DateRange`]: Inclusive creation-date bounds
//! - [`FilterOptions`]: Combined filter with AND logic

use super::types::{GalleryMediaItem, MediaKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Date Range
// =============================================================================

/// Filter by creation date. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the range. `None` means no lower bound.
    pub start: Option<DateTime<Utc>>,
    /// End of the range. `None` means no upper bound.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Whether `time` falls inside the range. Open ends match anything.
    #[must_use]
    pub fn matches_time(&self, time: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if time < start {
                return false;
            }
        }

        if let Some(end) = self.end {
            if time > end {
                return false;
            }
        }

        true
    }

    /// Whether either end of the range is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

// =============================================================================
// Composite Filter
// =============================================================================

/// Optional facet filters applied to the media list with AND logic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterOptions {
    /// Filters that let every item through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any constraint is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_some()
            || self.media_type.is_some()
            || self.date_range.as_ref().is_some_and(DateRange::is_active)
    }

    /// Returns the number of active constraints.
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(self.category.is_some())
            + usize::from(self.media_type.is_some())
            + usize::from(self.date_range.as_ref().is_some_and(DateRange::is_active))
    }

    /// Returns `true` if the item satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, item: &GalleryMediaItem) -> bool {
        if let Some(kind) = &self.media_type {
            if &item.media.kind != kind {
                return false;
            }
        }

        if let (Some(wanted), Some(actual)) = (&self.category, &item.category) {
            if !wanted.eq_ignore_ascii_case(actual) {
                return false;
            }
        }

        if let (Some(range), Some(created)) = (&self.date_range, item.created_at) {
            if !range.matches_time(created) {
                return false;
            }
        }

        true
    }

    /// Resets all filters to their inactive state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
