// SPDX-License-Identifier: MPL-2.0
//! Gallery orchestration.
//!
//! [`GalleryController`] owns one gallery's store and its components and
//! runs the fetch flows against a [`GalleryApi`]: project resolution, tab
//! loading, paging, search and retry. Every fetch is split into a `begin_*`
//! step that stamps a request generation and an `apply_*` step that drops
//! the response if a newer request of the same kind was issued meanwhile.
//! The async helpers chain both around the API call; shells that run
//! requests concurrently can call the halves themselves.

use crate::api::{GalleryApi, GalleryData, MediaPage, ProjectSummary, SearchData};
use crate::config::Config;
use crate::domain::gallery::{FilterOptions, LightboxImage, MediaId, ProjectId, TabId};
use crate::error::Result;
use crate::gallery::grid::{GridView, MediaGridLoader};
use crate::gallery::lazy_image::{self, ImageOptimizer, ImageRequest};
use crate::gallery::request::{RequestKind, RequestTicket, RequestTracker};
use crate::gallery::search::{is_blank, SearchController};
use crate::gallery::store::{Action, GalleryState, GalleryStore};
use crate::gallery::tabs::{self, ScrollTarget, TabBar, TabNavigator};
use crate::lightbox::{InputSources, Lightbox, LightboxSession};
use crate::ui::geometry::Rect;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Fetch that failed last, re-run by [`GalleryController::retry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedFetch {
    Project { slug: String },
    Gallery,
    MediaPage { tab: TabId, page: u32 },
    Search { query: String },
}

/// An issued media-page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFetch {
    pub ticket: RequestTicket,
    pub project: ProjectId,
    pub tab: TabId,
    pub page: u32,
    pub limit: u32,
}

/// An issued search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFetch {
    pub ticket: RequestTicket,
    pub project: ProjectId,
    pub query: String,
}

/// Whether a response changed the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// A newer request of the same kind superseded this one.
    Stale,
}

pub struct GalleryController {
    api: Arc<dyn GalleryApi>,
    config: Config,
    store: GalleryStore,
    requests: RequestTracker,
    search: SearchController,
    grid: MediaGridLoader,
    tabs: TabNavigator,
    project: Option<ProjectId>,
    last_failed: Option<FailedFetch>,
    share_supported: bool,
}

impl std::fmt::Debug for GalleryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryController")
            .field("project", &self.project)
            .field("state", self.store.state())
            .field("last_failed", &self.last_failed)
            .finish_non_exhaustive()
    }
}

impl GalleryController {
    /// Creates a controller with an empty store for a viewport `viewport_width` pixels wide.
    #[must_use]
    pub fn new(api: Arc<dyn GalleryApi>, config: Config, viewport_width: f32) -> Self {
        Self {
            api,
            store: GalleryStore::default(),
            requests: RequestTracker::new(),
            search: SearchController::new(&config.search),
            grid: MediaGridLoader::new(config.grid, viewport_width),
            tabs: TabNavigator::new(),
            config,
            project: None,
            last_failed: None,
            share_supported: false,
        }
    }

    /// Resolves grid images through `optimizer` with the given size and
    /// encoding hints. Resets any per-cell loading state.
    #[must_use]
    pub fn with_image_optimizer(
        mut self,
        optimizer: Arc<dyn ImageOptimizer>,
        request: ImageRequest,
    ) -> Self {
        self.grid.set_optimizer(optimizer, request);
        self
    }

    /// Whether the platform offers a native share sheet.
    #[must_use]
    pub fn with_share_support(mut self, supported: bool) -> Self {
        self.share_supported = supported;
        self
    }

    /// Current gallery state.
    #[must_use]
    pub fn state(&self) -> &GalleryState {
        self.store.state()
    }

    /// The underlying store, including its action journal.
    #[must_use]
    pub fn store(&self) -> &GalleryStore {
        &self.store
    }

    /// Project the gallery is showing, once resolved.
    #[must_use]
    pub fn project(&self) -> Option<ProjectId> {
        self.project
    }

    /// Fetch that [`Self::retry`] would re-run.
    #[must_use]
    pub fn last_failed(&self) -> Option<&FailedFetch> {
        self.last_failed.as_ref()
    }

    /// Applies `action` to the store directly.
    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    // =========================================================================
    // Project and tabs
    // =========================================================================

    /// Resolves `slug` and loads the project's gallery.
    pub async fn load_project(&mut self, slug: &str) -> Result<ProjectId> {
        let ticket = self.requests.issue(RequestKind::Project);
        self.dispatch(Action::SetLoading(true));

        let result = self.api.resolve_slug(slug).await;
        if !self.requests.is_current(ticket) {
            debug!("[GalleryController] dropping stale project response for {slug}");
            return result.map(|project| project.id);
        }

        match result {
            Ok(ProjectSummary { id, .. }) => {
                info!("[GalleryController] slug {slug} resolved to project {id}");
                self.set_project(id);
                self.load_gallery().await?;
                Ok(id)
            }
            Err(err) => Err(self.fail(
                FailedFetch::Project {
                    slug: slug.to_string(),
                },
                err,
            )),
        }
    }

    /// Points the controller at a project without loading anything.
    pub fn set_project(&mut self, project: ProjectId) {
        if self.project != Some(project) {
            self.search.clear_cache();
        }
        self.project = Some(project);
    }

    /// Loads the tab tree and the first page of the first tab.
    pub async fn load_gallery(&mut self) -> Result<()> {
        let Some(project) = self.project else {
            warn!("[GalleryController] load_gallery called without a project");
            return Ok(());
        };
        let ticket = self.requests.issue(RequestKind::Tabs);
        self.dispatch(Action::SetLoading(true));

        let result = self.api.gallery(project).await;
        if self.apply_gallery(ticket, result)? == Applied::Stale {
            return Ok(());
        }

        match self.state().tabs.first().map(|tab| tab.id) {
            Some(first) => {
                self.select_tab(first).await?;
            }
            None => self.dispatch(Action::SetLoading(false)),
        }
        Ok(())
    }

    /// Applies a tab-tree response.
    pub fn apply_gallery(
        &mut self,
        ticket: RequestTicket,
        result: Result<GalleryData>,
    ) -> Result<Applied> {
        if !self.requests.is_current(ticket) {
            debug!("[GalleryController] dropping stale gallery response");
            return Ok(Applied::Stale);
        }
        let data = result.map_err(|err| self.fail(FailedFetch::Gallery, err))?;
        debug!("[GalleryController] received {} tabs", data.tabs.len());

        self.search.clear_cache();
        self.dispatch(Action::SetTabs(data.tabs));
        if !data.breadcrumb.is_empty() {
            self.dispatch(Action::SetBreadcrumb(data.breadcrumb));
        }
        Ok(Applied::Applied)
    }

    /// Switches to `tab_id` and loads its first page. Unknown ids are ignored
    /// and return `Ok(false)`. Pending and in-flight searches are discarded.
    pub async fn select_tab(&mut self, tab_id: TabId) -> Result<bool> {
        let Some(change) = tabs::on_tab_change(self.state(), tab_id) else {
            debug!("[GalleryController] ignoring unknown tab {tab_id}");
            return Ok(false);
        };
        self.search.cancel();
        self.requests.invalidate(RequestKind::Search);
        self.store.dispatch_all(change.actions);
        self.grid.reset();

        if let Some(fetch) = self.begin_page(change.fetch, 1) {
            self.run_page(fetch).await?;
        }
        Ok(true)
    }

    /// Same as a click on the crumb's tab.
    pub async fn breadcrumb_click(&mut self, tab_id: TabId) -> Result<bool> {
        self.select_tab(tab_id).await
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Issues a media-page request and marks the gallery as loading.
    pub fn begin_page(&mut self, tab: TabId, page: u32) -> Option<PageFetch> {
        let project = self.project?;
        let ticket = self.requests.issue(RequestKind::MediaPage);
        self.dispatch(Action::SetLoading(true));
        Some(PageFetch {
            ticket,
            project,
            tab,
            page,
            limit: self.config.api.page_limit,
        })
    }

    /// Applies a media-page response. Page one replaces the media list,
    /// later pages append to it.
    pub fn apply_page(&mut self, fetch: PageFetch, result: Result<MediaPage>) -> Result<Applied> {
        if !self.requests.is_current(fetch.ticket) {
            debug!(
                "[GalleryController] dropping stale page {} of tab {}",
                fetch.page, fetch.tab
            );
            return Ok(Applied::Stale);
        }
        let data = result.map_err(|err| {
            self.fail(
                FailedFetch::MediaPage {
                    tab: fetch.tab,
                    page: fetch.page,
                },
                err,
            )
        })?;

        let media = if fetch.page <= 1 {
            Action::SetMedia(data.media)
        } else {
            Action::AppendMedia(data.media)
        };
        self.store.dispatch_all([
            media,
            Action::SetPagination(data.pagination),
            Action::SetLoading(false),
        ]);
        self.last_failed = None;
        Ok(Applied::Applied)
    }

    async fn run_page(&mut self, fetch: PageFetch) -> Result<Applied> {
        let result = self
            .api
            .media_page(fetch.project, fetch.tab, fetch.page, fetch.limit)
            .await;
        self.apply_page(fetch, result)
    }

    /// Loads the next page if one exists and nothing else is in flight.
    pub async fn load_more(&mut self) -> Result<bool> {
        let Some(next) = crate::gallery::grid::should_load_more(self.state()) else {
            return Ok(false);
        };
        let Some(fetch) = self.begin_page(next.tab_id, next.page) else {
            return Ok(false);
        };
        Ok(self.run_page(fetch).await? == Applied::Applied)
    }

    /// The grid's sentinel intersected the viewport.
    pub async fn on_sentinel_intersection(&mut self, intersection_ratio: f32) -> Result<bool> {
        if self
            .grid
            .on_sentinel_intersection(intersection_ratio, self.state())
            .is_none()
        {
            return Ok(false);
        }
        self.load_more().await
    }

    // =========================================================================
    // Search and filters
    // =========================================================================

    /// Handles a keystroke in the search box. Returns when the debounced
    /// search becomes due; the shell calls [`Self::poll_search`] then.
    pub fn on_search_input(&mut self, query: &str, now: Instant) -> Option<Instant> {
        let outcome = self.search.on_input(query, now);
        if outcome.deadline.is_none() {
            self.requests.invalidate(RequestKind::Search);
        }
        self.store.dispatch_all(outcome.actions);
        outcome.deadline
    }

    /// Runs the pending search if its debounce window has elapsed.
    pub async fn poll_search(&mut self, now: Instant) -> Result<bool> {
        match self.search.poll(now) {
            Some(query) => {
                self.run_search(&query).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// When the pending debounced search becomes due.
    #[must_use]
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Searches immediately, answering from the cache when possible.
    pub async fn run_search(&mut self, query: &str) -> Result<Applied> {
        if is_blank(query) {
            self.clear_search();
            return Ok(Applied::Applied);
        }
        if let Some(results) = self.search.cached(query) {
            debug!("[GalleryController] search cache hit for {query:?}");
            self.requests.invalidate(RequestKind::Search);
            self.store
                .dispatch_all(SearchController::results_actions(results));
            return Ok(Applied::Applied);
        }
        let Some(fetch) = self.begin_search(query) else {
            return Ok(Applied::Stale);
        };
        let result = self.api.search(fetch.project, &fetch.query).await;
        self.apply_search(fetch, result)
    }

    /// Issues a search request. `None` until a project is set.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchFetch> {
        let project = self.project?;
        Some(SearchFetch {
            ticket: self.requests.issue(RequestKind::Search),
            project,
            query: query.trim().to_string(),
        })
    }

    /// Applies a search response unless a newer search, a clear or a tab switch superseded it.
    pub fn apply_search(
        &mut self,
        fetch: SearchFetch,
        result: Result<SearchData>,
    ) -> Result<Applied> {
        if !self.requests.is_current(fetch.ticket) {
            debug!(
                "[GalleryController] dropping stale results for {:?}",
                fetch.query
            );
            return Ok(Applied::Stale);
        }
        let data = result.map_err(|err| {
            self.fail(
                FailedFetch::Search {
                    query: fetch.query.clone(),
                },
                err,
            )
        })?;
        debug!(
            "[GalleryController] {} results for {:?}",
            data.results.len(),
            fetch.query
        );
        self.search.remember(&fetch.query, data.results.clone());
        self.store
            .dispatch_all(SearchController::results_actions(data.results));
        self.last_failed = None;
        Ok(Applied::Applied)
    }

    /// Leaves search mode at once, discarding any pending or in-flight search.
    pub fn clear_search(&mut self) {
        self.search.cancel();
        self.requests.invalidate(RequestKind::Search);
        self.store.dispatch(Action::SetSearchQuery(String::new()));
        self.store.dispatch_all(SearchController::clear_actions());
    }

    /// Replaces the client-side filters. The search query is left alone.
    pub fn set_filters(&mut self, filters: FilterOptions) {
        self.dispatch(Action::SetFilters(filters));
    }

    /// Removes every client-side filter.
    pub fn clear_filters(&mut self) {
        self.dispatch(Action::SetFilters(FilterOptions::default()));
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn fail(&mut self, fetch: FailedFetch, err: crate::error::Error) -> crate::error::Error {
        warn!("[GalleryController] {fetch:?} failed: {err}");
        self.dispatch(Action::SetError(err.user_message().to_string()));
        // Searches never set `loading`; a page may still be in flight.
        if !matches!(fetch, FailedFetch::Search { .. }) {
            self.dispatch(Action::SetLoading(false));
        }
        self.last_failed = Some(fetch);
        err
    }

    /// Clears the error and re-runs the fetch that produced it.
    pub async fn retry(&mut self) -> Result<()> {
        self.dispatch(Action::ClearError);
        let Some(failed) = self.last_failed.take() else {
            return Ok(());
        };
        info!("[GalleryController] retrying {failed:?}");
        match failed {
            FailedFetch::Project { slug } => self.load_project(&slug).await.map(|_| ()),
            FailedFetch::Gallery => self.load_gallery().await,
            FailedFetch::MediaPage { tab, page } => {
                if let Some(fetch) = self.begin_page(tab, page) {
                    self.run_page(fetch).await?;
                }
                Ok(())
            }
            FailedFetch::Search { query } => self.run_search(&query).await.map(|_| ()),
        }
    }

    // =========================================================================
    // Grid, tab strip and lightbox
    // =========================================================================

    /// What the media area should render now.
    #[must_use]
    pub fn grid_view(&self) -> GridView<'_> {
        self.grid.view(self.store.state())
    }

    /// View model for the tab strip.
    #[must_use]
    pub fn tab_bar(&self) -> TabBar {
        TabBar::from_state(self.state())
    }

    /// Current grid column count.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// Recomputes the grid columns. Returns true if they changed.
    pub fn on_resize(&mut self, viewport_width: f32) -> bool {
        self.grid.on_resize(viewport_width)
    }

    /// A grid cell intersected the viewport. Unknown or hidden media ids
    /// are ignored.
    pub fn on_image_intersection(
        &mut self,
        id: MediaId,
        intersection_ratio: f32,
    ) -> lazy_image::Effect {
        let state = self.store.state();
        let Some(item) = state.visible_media().iter().find(|item| item.id == id) else {
            return lazy_image::Effect::None;
        };
        self.grid.on_image_intersection(item, intersection_ratio)
    }

    /// A grid cell's image finished loading.
    pub fn on_image_loaded(&mut self, id: MediaId) -> lazy_image::Effect {
        self.grid.on_image_loaded(id)
    }

    /// Marks one cell's image as failed. The rest of the grid is untouched.
    pub fn on_image_failed(&mut self, id: MediaId) -> lazy_image::Effect {
        self.grid.on_image_failed(id)
    }

    /// Scroll needed to bring the active tab button into view, once per
    /// active-tab change.
    pub fn auto_scroll_tabs(
        &mut self,
        button: Rect,
        container: Rect,
        scroll_left: f32,
    ) -> Option<ScrollTarget> {
        self.tabs
            .auto_scroll(self.store.state().active_tab, button, container, scroll_left)
    }

    /// Images the lightbox would page through: the visible, filtered media.
    #[must_use]
    pub fn lightbox_images(&self) -> Vec<LightboxImage> {
        let state = self.state();
        state
            .visible_media()
            .iter()
            .filter(|item| state.filters.matches(item) && item.media.kind.is_image())
            .map(LightboxImage::from)
            .collect()
    }

    /// Opens the lightbox on `media`. `None` if it is not a visible image.
    #[must_use]
    pub fn open_lightbox(&self, media: MediaId) -> Option<Lightbox> {
        let images = self.lightbox_images();
        let index = images.iter().position(|image| image.id == media)?;
        Lightbox::open(images, index, &self.config.lightbox, self.share_supported)
    }

    /// Like [`Self::open_lightbox`], bound to the shell's keyboard and touch
    /// input until the session is dropped.
    #[must_use]
    pub fn open_lightbox_session(
        &self,
        sources: &InputSources,
        media: MediaId,
    ) -> Option<LightboxSession> {
        let images = self.lightbox_images();
        let index = images.iter().position(|image| image.id == media)?;
        LightboxSession::open(
            sources,
            images,
            index,
            &self.config.lightbox,
            self.share_supported,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, InMemoryGalleryApi};
    use crate::domain::gallery::{MediaKind, PaginationInfo};
    use crate::error::{Error, GENERIC_FETCH_ERROR};
    use crate::test_utils::{media_items, sample_tabs};
    use std::time::Duration;

    fn fake() -> Arc<InMemoryGalleryApi> {
        Arc::new(
            InMemoryGalleryApi::new(ProjectId(7), "marina", sample_tabs())
                .with_media(TabId(1), media_items(100, 5))
                .with_media(TabId(2), media_items(1, 30))
                .with_media(TabId(12), media_items(200, 3)),
        )
    }

    fn controller(api: &Arc<InMemoryGalleryApi>) -> GalleryController {
        GalleryController::new(api.clone(), Config::default(), 1280.0)
    }

    #[tokio::test]
    async fn load_project_selects_first_tab() {
        let api = fake();
        let mut gallery = controller(&api);
        let id = gallery.load_project("marina").await.expect("loads");
        assert_eq!(id, ProjectId(7));

        let state = gallery.state();
        assert_eq!(state.active_tab, Some(0));
        assert_eq!(state.media.len(), 5);
        assert!(!state.loading);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ResolveSlug("marina".into()),
                ApiCall::Gallery(ProjectId(7)),
                ApiCall::MediaPage {
                    tab: TabId(1),
                    page: 1,
                    limit: 12
                },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_tab_is_ignored() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        api.clear_calls();
        assert!(!gallery.select_tab(TabId(999)).await.expect("no error"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn sub_tab_fetches_its_own_media() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        assert!(gallery.select_tab(TabId(12)).await.expect("loads"));

        let state = gallery.state();
        assert_eq!(state.active_tab, Some(0));
        assert_eq!(state.breadcrumb.len(), 2);
        assert_eq!(state.media.len(), 3);
    }

    #[tokio::test]
    async fn stale_page_response_is_dropped() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.set_project(ProjectId(7));
        gallery.dispatch(Action::SetTabs(sample_tabs()));

        let slow = gallery.begin_page(TabId(1), 1).expect("project set");
        let fast = gallery.begin_page(TabId(2), 1).expect("project set");

        let fast_page = api.media_page(ProjectId(7), TabId(2), 1, 12).await;
        assert_eq!(gallery.apply_page(fast, fast_page).expect("ok"), Applied::Applied);

        let slow_page = api.media_page(ProjectId(7), TabId(1), 1, 12).await;
        assert_eq!(gallery.apply_page(slow, slow_page).expect("ok"), Applied::Stale);

        assert_eq!(gallery.state().media.len(), 12);
        assert_eq!(gallery.state().media[0].id, MediaId(1));
    }

    #[tokio::test]
    async fn stale_search_response_is_dropped() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.set_project(ProjectId(7));

        let first = gallery.begin_search("görsel 1").expect("project set");
        let second = gallery.begin_search("görsel 2").expect("project set");

        let second_results = api.search(ProjectId(7), "görsel 2").await;
        gallery.apply_search(second, second_results).expect("ok");
        let first_results = api.search(ProjectId(7), "görsel 1").await;
        assert_eq!(
            gallery.apply_search(first, first_results).expect("ok"),
            Applied::Stale
        );
        assert!(gallery
            .state()
            .search_results
            .iter()
            .all(|item| item.title.contains('2')));
    }

    #[tokio::test]
    async fn tab_switch_discards_in_flight_search() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");

        let late = gallery.begin_search("görsel").expect("project set");
        gallery.select_tab(TabId(2)).await.expect("loads");
        assert!(!gallery.state().is_searching);

        let results = api.search(ProjectId(7), "görsel").await;
        assert_eq!(gallery.apply_search(late, results).expect("ok"), Applied::Stale);

        let state = gallery.state();
        assert!(!state.is_searching);
        assert!(state.search_results.is_empty());
        assert_eq!(state.media.len(), 12);
        assert!(crate::gallery::grid::should_load_more(state).is_some());
    }

    #[tokio::test]
    async fn tab_switch_cancels_pending_search() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");

        let deadline = gallery
            .on_search_input("görsel", Instant::now())
            .expect("debounced");
        gallery.select_tab(TabId(2)).await.expect("loads");
        api.clear_calls();

        assert!(gallery.search_deadline().is_none());
        assert!(!gallery.poll_search(deadline).await.expect("ok"));
        assert!(api.calls().is_empty());
        assert!(!gallery.state().is_searching);
    }

    #[tokio::test]
    async fn search_failure_keeps_page_fetch_in_flight() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        gallery.select_tab(TabId(2)).await.expect("loads");

        let page = gallery.begin_page(TabId(2), 2).expect("project set");
        let search = gallery.begin_search("görsel").expect("project set");
        gallery
            .apply_search(search, Err(Error::Api("unavailable".into())))
            .unwrap_err();

        assert!(gallery.state().loading);
        assert!(crate::gallery::grid::should_load_more(gallery.state()).is_none());
        assert!(!gallery.load_more().await.expect("ok"));

        let result = api.media_page(ProjectId(7), TabId(2), 2, 12).await;
        assert_eq!(gallery.apply_page(page, result).expect("ok"), Applied::Applied);
        assert!(!gallery.state().loading);
        assert_eq!(gallery.state().media.len(), 24);
    }

    #[tokio::test]
    async fn grid_images_load_lazily_per_cell() {
        let api = fake();
        let mut gallery = controller(&api).with_image_optimizer(
            Arc::new(crate::gallery::lazy_image::QueryParamOptimizer),
            ImageRequest {
                width: Some(320),
                ..ImageRequest::default()
            },
        );
        gallery.load_project("marina").await.expect("loads");

        assert_eq!(
            gallery.on_image_intersection(MediaId(101), 0.5),
            lazy_image::Effect::StartLoading("/uploads/101.jpg?w=320".into())
        );
        gallery.on_image_intersection(MediaId(102), 0.5);
        assert_eq!(
            gallery.on_image_intersection(MediaId(999), 1.0),
            lazy_image::Effect::None
        );

        assert!(matches!(
            gallery.on_image_failed(MediaId(101)),
            lazy_image::Effect::ReportError { .. }
        ));
        assert!(gallery.state().error.is_none());
        match gallery.grid_view() {
            GridView::Items { rows, .. } => {
                let cells: Vec<_> = rows.into_iter().flatten().collect();
                assert_eq!(cells[1].status, crate::gallery::ImageStatus::Failed);
                assert!(matches!(
                    cells[2].image,
                    crate::gallery::LazyImageView::Pending { .. }
                ));
                assert_eq!(cells[0].status, crate::gallery::ImageStatus::Pending);
            }
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_sets_generic_error_and_retry_recovers() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        gallery.select_tab(TabId(2)).await.expect("loads");

        api.fail_next(1);
        let err = gallery.load_more().await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
        assert_eq!(gallery.state().error.as_deref(), Some(GENERIC_FETCH_ERROR));
        assert!(!gallery.state().loading);
        assert_eq!(
            gallery.last_failed(),
            Some(&FailedFetch::MediaPage {
                tab: TabId(2),
                page: 2
            })
        );
        assert!(matches!(gallery.grid_view(), GridView::Error(_)));

        gallery.retry().await.expect("retry succeeds");
        assert!(gallery.state().error.is_none());
        assert_eq!(gallery.state().media.len(), 24);
        assert_eq!(gallery.state().pagination.page, 2);
    }

    #[tokio::test]
    async fn blank_search_clears_without_network() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        let now = Instant::now();

        let deadline = gallery.on_search_input("görsel", now).expect("debounced");
        assert!(!gallery.poll_search(now).await.expect("ok"));
        assert!(gallery.poll_search(deadline).await.expect("ok"));
        assert!(gallery.state().is_searching);

        api.clear_calls();
        assert!(gallery.on_search_input("", deadline).is_none());
        assert!(!gallery.state().is_searching);
        assert!(gallery.state().search_results.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_search_hits_cache() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.set_project(ProjectId(7));
        gallery.run_search("görsel 2").await.expect("search");
        gallery.clear_search();
        api.clear_calls();

        gallery.run_search("görsel 2").await.expect("search");
        assert!(api.calls().is_empty());
        assert!(gallery.state().is_searching);
    }

    #[tokio::test]
    async fn load_more_is_blocked_while_searching() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        gallery.select_tab(TabId(2)).await.expect("loads");
        gallery.run_search("görsel").await.expect("search");
        api.clear_calls();

        assert!(!gallery.on_sentinel_intersection(1.0).await.expect("ok"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn filters_keep_query_and_limit_lightbox() {
        let api = fake();
        let mut gallery = controller(&api);
        gallery.load_project("marina").await.expect("loads");
        gallery.on_search_input("vil", Instant::now());
        gallery.set_filters(FilterOptions {
            media_type: Some(MediaKind::Image),
            ..FilterOptions::default()
        });
        assert_eq!(gallery.state().search_query, "vil");

        let lightbox = gallery.open_lightbox(MediaId(102)).expect("visible image");
        assert_eq!(lightbox.position_label(), "3 / 5");
        assert!(gallery.open_lightbox(MediaId(999)).is_none());
    }

    #[tokio::test]
    async fn empty_gallery_stops_loading() {
        let api = Arc::new(InMemoryGalleryApi::new(ProjectId(7), "bos", Vec::new()));
        let mut gallery = GalleryController::new(api, Config::default(), 800.0);
        gallery.load_project("bos").await.expect("loads");
        assert!(!gallery.state().loading);
        assert_eq!(gallery.tab_bar(), TabBar::Empty);
        assert_eq!(gallery.state().pagination, PaginationInfo::default());
    }

    #[tokio::test]
    async fn debounce_deadline_follows_config() {
        let api = fake();
        let mut config = Config::default();
        config.search.debounce_ms = 100;
        let mut gallery = GalleryController::new(api, config, 800.0);
        let now = Instant::now();
        assert_eq!(
            gallery.on_search_input("a", now),
            Some(now + Duration::from_millis(100))
        );
        assert_eq!(gallery.search_deadline(), Some(now + Duration::from_millis(100)));
    }
}
