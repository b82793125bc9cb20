// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the gallery engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **API**: Page size and request timeout
//! - **Grid**: Responsive breakpoints and infinite-scroll sentinel
//! - **Search**: Debounce window and result cache
//! - **Lightbox**: Zoom bounds and swipe thresholds

// ==========================================================================
// API Defaults
// ==========================================================================

/// Default base URL of the Gallery API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Number of media items requested per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Request timeout applied by the HTTP client (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Viewports narrower than this render two columns.
pub const DEFAULT_SMALL_BREAKPOINT_PX: f32 = 768.0;

/// Viewports narrower than this (and not small) render three columns.
pub const DEFAULT_MEDIUM_BREAKPOINT_PX: f32 = 1024.0;

/// Column count below the small breakpoint.
pub const SMALL_COLUMNS: usize = 2;

/// Column count between the small and medium breakpoints.
pub const MEDIUM_COLUMNS: usize = 3;

/// Column count at or above the medium breakpoint.
pub const LARGE_COLUMNS: usize = 4;

/// Intersection ratio at which the infinite-scroll sentinel fires.
pub const DEFAULT_SENTINEL_THRESHOLD: f32 = 0.1;

/// Intersection ratio at which a lazy image starts loading.
pub const DEFAULT_LAZY_IMAGE_THRESHOLD: f32 = 0.1;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Quiet period before a search request is issued (in milliseconds).
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Number of recent search queries kept in the result cache.
pub const DEFAULT_SEARCH_CACHE_CAPACITY: usize = 16;

/// Minimum search cache capacity.
pub const MIN_SEARCH_CACHE_CAPACITY: usize = 1;

/// Maximum search cache capacity.
pub const MAX_SEARCH_CACHE_CAPACITY: usize = 256;

// ==========================================================================
// Lightbox Defaults
// ==========================================================================

/// Zoom factor when an image is opened or navigated to.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom increment for a single zoom-in/zoom-out step.
pub const DEFAULT_ZOOM_STEP: f32 = 0.25;

/// Horizontal travel (in pixels) beyond which a touch counts as a swipe.
pub const DEFAULT_SWIPE_DISTANCE_PX: f32 = 50.0;

/// Horizontal speed (in pixels per millisecond) beyond which a touch counts as a swipe.
pub const DEFAULT_SWIPE_VELOCITY_PX_PER_MS: f32 = 0.3;

/// Rotation increment in degrees.
pub const ROTATION_STEP_DEGREES: u16 = 90;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_PAGE_LIMIT > 0);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS > 0);

    assert!(DEFAULT_SMALL_BREAKPOINT_PX < DEFAULT_MEDIUM_BREAKPOINT_PX);
    assert!(SMALL_COLUMNS < MEDIUM_COLUMNS);
    assert!(MEDIUM_COLUMNS < LARGE_COLUMNS);
    assert!(DEFAULT_SENTINEL_THRESHOLD > 0.0 && DEFAULT_SENTINEL_THRESHOLD <= 1.0);
    assert!(DEFAULT_LAZY_IMAGE_THRESHOLD > 0.0 && DEFAULT_LAZY_IMAGE_THRESHOLD <= 1.0);

    assert!(DEFAULT_SEARCH_DEBOUNCE_MS > 0);
    assert!(MIN_SEARCH_CACHE_CAPACITY > 0);
    assert!(DEFAULT_SEARCH_CACHE_CAPACITY >= MIN_SEARCH_CACHE_CAPACITY);
    assert!(DEFAULT_SEARCH_CACHE_CAPACITY <= MAX_SEARCH_CACHE_CAPACITY);

    assert!(MIN_ZOOM > 0.0);
    assert!(MIN_ZOOM < DEFAULT_ZOOM);
    assert!(MAX_ZOOM > DEFAULT_ZOOM);
    assert!(DEFAULT_ZOOM_STEP > 0.0);
    assert!(DEFAULT_SWIPE_DISTANCE_PX > 0.0);
    assert!(DEFAULT_SWIPE_VELOCITY_PX_PER_MS > 0.0);
    assert!(360 % ROTATION_STEP_DEGREES == 0);
};
