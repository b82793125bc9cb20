// SPDX-License-Identifier: MPL-2.0
//! Gallery browsing components: state store, tab navigation, grid loading,
//! lazy images and debounced search.

pub mod grid;
pub mod lazy_image;
pub mod request;
pub mod search;
pub mod store;
pub mod tabs;

pub use grid::{GridView, ImageStatus, LoadMore, MediaGridLoader};
pub use lazy_image::{
    ImageOptimizer, ImageRequest, LazyImage, LazyImageView, PassthroughOptimizer,
    QueryParamOptimizer,
};
pub use request::{RequestKind, RequestTicket, RequestTracker};
pub use search::{SearchController, SearchEvent};
pub use store::{reduce, Action, GalleryState, GalleryStore};
pub use tabs::{TabBar, TabChange, TabNavigator};
