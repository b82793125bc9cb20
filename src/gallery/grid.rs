// SPDX-License-Identifier: MPL-2.0
//! Responsive media grid with infinite-scroll pagination.
//!
//! The column count is a pure function of viewport width, recomputed on
//! every resize. A sentinel below the last row reports its intersection
//! ratio; crossing the threshold requests the next page when more items
//! exist, nothing is loading, and no search is active. Each cell's image is
//! a [`LazyImage`] keyed by media id, so one failing image never affects its
//! siblings.

use super::lazy_image::{self, ImageOptimizer, ImageRequest, LazyImage, LazyImageView};
use super::store::GalleryState;
use crate::config::{GridConfig, LARGE_COLUMNS, MEDIUM_COLUMNS, SMALL_COLUMNS};
use crate::domain::gallery::{GalleryMediaItem, MediaId, TabId};
use std::collections::HashMap;
use std::sync::Arc;

/// Returns the number of grid columns for a viewport `width`.
#[must_use]
pub fn columns_for_width(width: f32, config: &GridConfig) -> usize {
    if width < config.small_breakpoint_px {
        SMALL_COLUMNS
    } else if width < config.medium_breakpoint_px {
        MEDIUM_COLUMNS
    } else {
        LARGE_COLUMNS
    }
}

/// Per-item image loading status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Request for the next page of the current tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    pub tab_id: TabId,
    pub page: u32,
}

/// Decides whether a sentinel intersection should load another page.
#[must_use]
pub fn should_load_more(state: &GalleryState) -> Option<LoadMore> {
    if !state.pagination.has_more || state.loading || state.is_searching {
        return None;
    }
    let tab_id = state.current_tab_id()?;
    Some(LoadMore {
        tab_id,
        page: state.pagination.next_page(),
    })
}

impl From<&lazy_image::State> for ImageStatus {
    fn from(state: &lazy_image::State) -> Self {
        match state {
            lazy_image::State::Placeholder | lazy_image::State::Loading { .. } => Self::Pending,
            lazy_image::State::Loaded { .. } => Self::Loaded,
            lazy_image::State::Failed => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub item: &'a GalleryMediaItem,
    pub status: ImageStatus,
    pub image: LazyImageView<'a>,
}

/// What the media area should render. Error and empty states replace the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView<'a> {
    /// First page in flight, nothing to show yet.
    Loading,
    Error(&'a str),
    Empty,
    Items {
        columns: usize,
        rows: Vec<Vec<GridCell<'a>>>,
        /// A further page is being fetched below the grid.
        loading_more: bool,
        /// Whether the sentinel should be rendered at all.
        show_sentinel: bool,
    },
}

/// Grid layout and per-cell image loading for one gallery.
#[derive(Clone)]
pub struct MediaGridLoader {
    config: GridConfig,
    columns: usize,
    optimizer: Arc<dyn ImageOptimizer>,
    request: ImageRequest,
    images: HashMap<MediaId, LazyImage>,
}

impl std::fmt::Debug for MediaGridLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaGridLoader")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("request", &self.request)
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}

impl MediaGridLoader {
    /// Creates a grid that loads original image sources.
    #[must_use]
    pub fn new(config: GridConfig, viewport_width: f32) -> Self {
        Self::with_optimizer(
            config,
            viewport_width,
            Arc::new(lazy_image::PassthroughOptimizer),
            ImageRequest::default(),
        )
    }

    /// Creates a grid whose cells resolve `request` through `optimizer`.
    #[must_use]
    pub fn with_optimizer(
        config: GridConfig,
        viewport_width: f32,
        optimizer: Arc<dyn ImageOptimizer>,
        request: ImageRequest,
    ) -> Self {
        Self {
            config,
            columns: columns_for_width(viewport_width, &config),
            optimizer,
            request,
            images: HashMap::new(),
        }
    }

    /// Replaces the source negotiation for cell images. Cells already
    /// loaded are forgotten so they resolve again.
    pub fn set_optimizer(&mut self, optimizer: Arc<dyn ImageOptimizer>, request: ImageRequest) {
        self.optimizer = optimizer;
        self.request = request;
        self.images.clear();
    }

    /// Current column count.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Recomputes the column count. Returns true if it changed.
    pub fn on_resize(&mut self, viewport_width: f32) -> bool {
        let columns = columns_for_width(viewport_width, &self.config);
        let changed = columns != self.columns;
        self.columns = columns;
        changed
    }

    /// Handles an intersection report for the sentinel element.
    #[must_use]
    pub fn on_sentinel_intersection(
        &self,
        intersection_ratio: f32,
        state: &GalleryState,
    ) -> Option<LoadMore> {
        if intersection_ratio < self.config.sentinel_threshold {
            return None;
        }
        should_load_more(state)
    }

    /// A cell's element intersected the viewport. Starts loading its image
    /// once the ratio reaches the configured threshold.
    pub fn on_image_intersection(
        &mut self,
        item: &GalleryMediaItem,
        intersection_ratio: f32,
    ) -> lazy_image::Effect {
        let threshold = self.config.image_threshold;
        let request = self.request;
        let image = self.images.entry(item.id).or_insert_with(|| {
            LazyImage::new(item.media.url.as_str())
                .with_request(request)
                .with_threshold(threshold)
        });
        image.handle(
            lazy_image::Message::Intersected(intersection_ratio),
            self.optimizer.as_ref(),
        )
    }

    /// The shell finished loading a cell's image.
    pub fn on_image_loaded(&mut self, id: MediaId) -> lazy_image::Effect {
        self.forward(id, lazy_image::Message::Loaded)
    }

    /// The shell failed to load a cell's image. Only that cell is affected.
    pub fn on_image_failed(&mut self, id: MediaId) -> lazy_image::Effect {
        let effect = self.forward(id, lazy_image::Message::Failed);
        if let lazy_image::Effect::ReportError { src } = &effect {
            log::debug!("[MediaGrid] image {id} failed to load from {src}");
        }
        effect
    }

    fn forward(&mut self, id: MediaId, msg: lazy_image::Message) -> lazy_image::Effect {
        match self.images.get_mut(&id) {
            Some(image) => image.handle(msg, self.optimizer.as_ref()),
            None => lazy_image::Effect::None,
        }
    }

    /// Loading status of a cell's image.
    #[must_use]
    pub fn status(&self, id: MediaId) -> ImageStatus {
        self.images
            .get(&id)
            .map(|image| ImageStatus::from(image.state()))
            .unwrap_or_default()
    }

    /// Forgets all cell images, used when the media list is replaced.
    pub fn reset(&mut self) {
        self.images.clear();
    }

    /// Builds the view for the current state, applying the active filters.
    #[must_use]
    pub fn view<'a>(&'a self, state: &'a GalleryState) -> GridView<'a> {
        if let Some(error) = state.error.as_deref() {
            return GridView::Error(error);
        }

        let cells: Vec<GridCell<'a>> = state
            .visible_media()
            .iter()
            .filter(|item| state.filters.matches(item))
            .map(|item| match self.images.get(&item.id) {
                Some(image) => GridCell {
                    item,
                    status: ImageStatus::from(image.state()),
                    image: image.view(),
                },
                None => GridCell {
                    item,
                    status: ImageStatus::Pending,
                    image: LazyImageView::Placeholder,
                },
            })
            .collect();

        if cells.is_empty() {
            return if state.loading {
                GridView::Loading
            } else {
                GridView::Empty
            };
        }

        let rows = cells
            .chunks(self.columns.max(1))
            .map(<[GridCell<'a>]>::to_vec)
            .collect();

        GridView::Items {
            columns: self.columns,
            rows,
            loading_more: state.loading,
            show_sentinel: !state.is_searching && state.pagination.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::{BreadcrumbItem, FilterOptions, MediaKind, PaginationInfo};
    use crate::gallery::store::{reduce, Action};
    use crate::test_utils::media_items;

    fn loaded_state(has_more: bool) -> GalleryState {
        [
            Action::SetBreadcrumb(vec![BreadcrumbItem {
                id: TabId(2),
                title: "İç Mekan".into(),
            }]),
            Action::SetMedia(media_items(1, 12)),
            Action::SetPagination(PaginationInfo::new(1, 12, if has_more { 30 } else { 12 })),
        ]
        .into_iter()
        .fold(GalleryState::default(), reduce)
    }

    #[test]
    fn columns_follow_breakpoints() {
        let config = GridConfig::default();
        assert_eq!(columns_for_width(320.0, &config), 2);
        assert_eq!(columns_for_width(767.9, &config), 2);
        assert_eq!(columns_for_width(768.0, &config), 3);
        assert_eq!(columns_for_width(1023.0, &config), 3);
        assert_eq!(columns_for_width(1024.0, &config), 4);
        assert_eq!(columns_for_width(2560.0, &config), 4);
    }

    #[test]
    fn resize_reports_column_changes() {
        let mut grid = MediaGridLoader::new(GridConfig::default(), 1280.0);
        assert!(!grid.on_resize(1100.0));
        assert!(grid.on_resize(900.0));
        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn sentinel_requests_next_page() {
        let grid = MediaGridLoader::new(GridConfig::default(), 1280.0);
        let state = loaded_state(true);
        assert_eq!(
            grid.on_sentinel_intersection(0.5, &state),
            Some(LoadMore {
                tab_id: TabId(2),
                page: 2
            })
        );
    }

    #[test]
    fn sentinel_below_threshold_is_ignored() {
        let grid = MediaGridLoader::new(GridConfig::default(), 1280.0);
        assert!(grid.on_sentinel_intersection(0.05, &loaded_state(true)).is_none());
    }

    #[test]
    fn no_load_more_without_more_pages() {
        assert!(should_load_more(&loaded_state(false)).is_none());
    }

    #[test]
    fn no_load_more_while_loading_or_searching() {
        let loading = reduce(loaded_state(true), Action::SetLoading(true));
        assert!(should_load_more(&loading).is_none());

        let searching = reduce(loaded_state(true), Action::SetIsSearching(true));
        assert!(should_load_more(&searching).is_none());
    }

    #[test]
    fn failed_image_is_isolated() {
        let mut grid = MediaGridLoader::new(GridConfig::default(), 500.0);
        let state = loaded_state(false);
        for item in &state.media[2..5] {
            assert!(matches!(
                grid.on_image_intersection(item, 1.0),
                lazy_image::Effect::StartLoading(_)
            ));
        }

        assert_eq!(
            grid.on_image_failed(MediaId(3)),
            lazy_image::Effect::ReportError {
                src: state.media[2].media.url.clone()
            }
        );
        grid.on_image_loaded(MediaId(4));
        assert_eq!(grid.status(MediaId(3)), ImageStatus::Failed);
        assert_eq!(grid.status(MediaId(4)), ImageStatus::Loaded);
        assert_eq!(grid.status(MediaId(5)), ImageStatus::Pending);
        assert!(state.error.is_none());

        match grid.view(&state) {
            GridView::Items { rows, .. } => {
                let cells: Vec<_> = rows.into_iter().flatten().collect();
                assert_eq!(cells[2].image, LazyImageView::ErrorPlaceholder);
                assert!(matches!(cells[3].image, LazyImageView::Visible { .. }));
                assert!(matches!(cells[4].image, LazyImageView::Pending { .. }));
                assert_eq!(cells[5].image, LazyImageView::Placeholder);
            }
            other => panic!("expected items, got {other:?}"),
        }

        grid.reset();
        assert_eq!(grid.status(MediaId(3)), ImageStatus::Pending);
    }

    #[test]
    fn cell_image_waits_for_threshold_and_uses_optimizer() {
        let mut grid = MediaGridLoader::with_optimizer(
            GridConfig::default(),
            900.0,
            Arc::new(lazy_image::QueryParamOptimizer),
            ImageRequest {
                width: Some(400),
                ..ImageRequest::default()
            },
        );
        let item = GalleryMediaItem::image(9, "Salon", "/uploads/9.jpg");
        assert_eq!(grid.on_image_intersection(&item, 0.05), lazy_image::Effect::None);
        assert_eq!(
            grid.on_image_intersection(&item, 0.5),
            lazy_image::Effect::StartLoading("/uploads/9.jpg?w=400".into())
        );
        assert_eq!(grid.on_image_intersection(&item, 1.0), lazy_image::Effect::None);
    }

    #[test]
    fn events_for_unseen_cells_are_ignored() {
        let mut grid = MediaGridLoader::new(GridConfig::default(), 900.0);
        assert_eq!(grid.on_image_failed(MediaId(1)), lazy_image::Effect::None);
        assert_eq!(grid.status(MediaId(1)), ImageStatus::Pending);
    }

    #[test]
    fn view_chunks_media_into_rows() {
        let grid = MediaGridLoader::new(GridConfig::default(), 900.0);
        let state = loaded_state(true);
        match grid.view(&state) {
            GridView::Items {
                columns,
                rows,
                show_sentinel,
                ..
            } => {
                assert_eq!(columns, 3);
                assert_eq!(rows.len(), 4);
                assert!(rows.iter().all(|row| row.len() == 3));
                assert!(show_sentinel);
            }
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[test]
    fn error_replaces_grid() {
        let grid = MediaGridLoader::new(GridConfig::default(), 900.0);
        let state = reduce(loaded_state(true), Action::SetError("failed".into()));
        assert_eq!(grid.view(&state), GridView::Error("failed"));
    }

    #[test]
    fn empty_and_loading_states() {
        let grid = MediaGridLoader::new(GridConfig::default(), 900.0);
        assert_eq!(grid.view(&GalleryState::default()), GridView::Empty);
        let loading = reduce(GalleryState::default(), Action::SetLoading(true));
        assert_eq!(grid.view(&loading), GridView::Loading);
    }

    #[test]
    fn filters_narrow_the_visible_cells() {
        let grid = MediaGridLoader::new(GridConfig::default(), 900.0);
        let state = reduce(
            loaded_state(false),
            Action::SetFilters(FilterOptions {
                media_type: Some(MediaKind::Video),
                ..FilterOptions::default()
            }),
        );
        assert_eq!(grid.view(&state), GridView::Empty);
    }
}
