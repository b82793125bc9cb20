// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types as delivered by the Gallery API.
//!
//! Field names follow the API's camelCase JSON; Rust names are snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Numeric project identifier, resolved from a human slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

/// Gallery tab (category node) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

/// Media entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tabs
// =============================================================================

/// One gallery category node. May carry nested sub-tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItem {
    pub id: TabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub media_count: u32,
    #[serde(default)]
    pub has_own_media: bool,
    #[serde(default)]
    pub sub_tabs: Vec<TabItem>,
}

impl TabItem {
    /// Creates a leaf tab with no description and no sub-tabs.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, media_count: u32) -> Self {
        Self {
            id: TabId(id),
            title: title.into(),
            description: None,
            category: String::new(),
            media_count,
            has_own_media: media_count > 0,
            sub_tabs: Vec::new(),
        }
    }

    /// Builder-style helper for attaching sub-tabs.
    #[must_use]
    pub fn with_sub_tabs(mut self, sub_tabs: Vec<TabItem>) -> Self {
        self.sub_tabs = sub_tabs;
        self
    }

    #[must_use]
    pub fn has_sub_tabs(&self) -> bool {
        !self.sub_tabs.is_empty()
    }
}

/// One step of the root-to-active path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub id: TabId,
    pub title: String,
}

impl From<&TabItem> for BreadcrumbItem {
    fn from(tab: &TabItem) -> Self {
        Self {
            id: tab.id,
            title: tab.title.clone(),
        }
    }
}

// =============================================================================
// Media
// =============================================================================

/// Kind of media behind a gallery entry.
///
/// The API sends an upper-case string. Unknown values are kept verbatim so
/// newer server types survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
    Other(String),
}

impl MediaKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
            MediaKind::Pdf => "PDF",
            MediaKind::Other(raw) => raw,
        }
    }

    /// Whether the lightbox can display this media as a picture.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

impl From<String> for MediaKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "IMAGE" => MediaKind::Image,
            "VIDEO" => MediaKind::Video,
            "PDF" => MediaKind::Pdf,
            _ => MediaKind::Other(raw),
        }
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        kind.as_str().to_string()
    }
}

/// The file behind a gallery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// One media entry belonging to the active tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryMediaItem {
    pub id: MediaId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub media: MediaRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GalleryMediaItem {
    /// Creates an image entry with only the required fields.
    #[must_use]
    pub fn image(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: MediaId(id),
            title: title.into(),
            description: None,
            media: MediaRef {
                url: url.into(),
                alt: None,
                kind: MediaKind::Image,
            },
            category: None,
            created_at: None,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Page bookkeeping for the active tab.
///
/// `has_more` is true iff more items exist beyond `page * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub has_more: bool,
}

impl PaginationInfo {
    /// Builds pagination info with `has_more` derived from the totals.
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u32) -> Self {
        Self {
            page,
            limit,
            total,
            has_more: u64::from(page) * u64::from(limit) < u64::from(total),
        }
    }

    /// Page number to request next.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            page: 1,
            limit: crate::config::DEFAULT_PAGE_LIMIT,
            total: 0,
            has_more: false,
        }
    }
}

// =============================================================================
// Lightbox projection
// =============================================================================

/// Projection of a [`GalleryMediaItem`] used only inside the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxImage {
    pub id: MediaId,
    pub url: String,
    pub alt: String,
    pub title: String,
}

impl From<&GalleryMediaItem> for LightboxImage {
    fn from(item: &GalleryMediaItem) -> Self {
        Self {
            id: item.id,
            url: item.media.url.clone(),
            alt: item
                .media
                .alt
                .clone()
                .unwrap_or_else(|| item.title.clone()),
            title: item.title.clone(),
        }
    }
}
