// SPDX-License-Identifier: MPL-2.0
//! Domain layer: value types shared by every gallery component.
//!
//! Types here carry no behaviour beyond validation and small derivations,
//! and depend only on `serde` (wire format) and `chrono` (timestamps).
//!
//! # Modules
//!
//! - [`gallery`]: Tabs, breadcrumbs, media entries, pagination and filters
//!   ([`TabItem`](gallery::TabItem), [`GalleryMediaItem`](gallery::GalleryMediaItem),
//!   [`PaginationInfo`](gallery::PaginationInfo), [`FilterOptions`](gallery::FilterOptions))

pub mod gallery;
