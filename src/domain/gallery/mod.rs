// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types: tabs, breadcrumbs, media entries, pagination and filters.

pub mod filter;
pub mod types;

pub use filter::{DateRange, FilterOptions};
pub use types::{
    BreadcrumbItem, GalleryMediaItem, LightboxImage, MediaId, MediaKind, MediaRef,
    PaginationInfo, ProjectId, TabId, TabItem,
};
