// SPDX-License-Identifier: MPL-2.0
//! Gallery state store.
//!
//! [`GalleryState`] is the single source of truth for one gallery instance.
//! It changes only through [`reduce`], a pure function over the closed
//! [`Action`] enum. [`GalleryStore`] owns one state value and is created per
//! gallery, never shared through a static, so several galleries on one page
//! stay independent.

use crate::domain::gallery::{
    BreadcrumbItem, FilterOptions, GalleryMediaItem, PaginationInfo, TabItem,
};
use std::collections::VecDeque;

/// Aggregate root of the gallery engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryState {
    pub tabs: Vec<TabItem>,
    /// Index into `tabs` of the active root tab.
    pub active_tab: Option<usize>,
    pub breadcrumb: Vec<BreadcrumbItem>,
    pub media: Vec<GalleryMediaItem>,
    pub pagination: PaginationInfo,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub filters: FilterOptions,
    pub search_results: Vec<GalleryMediaItem>,
    pub is_searching: bool,
}

impl GalleryState {
    /// The active root tab, if any.
    #[must_use]
    pub fn active_root(&self) -> Option<&TabItem> {
        self.active_tab.and_then(|index| self.tabs.get(index))
    }

    /// Id of the tab whose media is displayed: the breadcrumb tail, which is
    /// the selected sub-tab when one is selected.
    #[must_use]
    pub fn current_tab_id(&self) -> Option<crate::domain::gallery::TabId> {
        self.breadcrumb
            .last()
            .map(|crumb| crumb.id)
            .or_else(|| self.active_root().map(|tab| tab.id))
    }

    /// Media the grid should display: search results while searching,
    /// otherwise the paginated tab media.
    #[must_use]
    pub fn visible_media(&self) -> &[GalleryMediaItem] {
        if self.is_searching {
            &self.search_results
        } else {
            &self.media
        }
    }
}

/// Every state transition the gallery supports.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTabs(Vec<TabItem>),
    SetActiveTab(usize),
    SetBreadcrumb(Vec<BreadcrumbItem>),
    SetMedia(Vec<GalleryMediaItem>),
    AppendMedia(Vec<GalleryMediaItem>),
    SetPagination(PaginationInfo),
    SetLoading(bool),
    SetError(String),
    ClearError,
    SetSearchQuery(String),
    SetFilters(FilterOptions),
    SetSearchResults(Vec<GalleryMediaItem>),
    SetIsSearching(bool),
    /// Clears media, pagination and search results; keeps tabs, active tab
    /// and breadcrumb.
    ResetGallery,
}

impl Action {
    /// Stable tag used in logs and the action journal.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Action::SetTabs(_) => "SET_TABS",
            Action::SetActiveTab(_) => "SET_ACTIVE_TAB",
            Action::SetBreadcrumb(_) => "SET_BREADCRUMB",
            Action::SetMedia(_) => "SET_MEDIA",
            Action::AppendMedia(_) => "APPEND_MEDIA",
            Action::SetPagination(_) => "SET_PAGINATION",
            Action::SetLoading(_) => "SET_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::ClearError => "CLEAR_ERROR",
            Action::SetSearchQuery(_) => "SET_SEARCH_QUERY",
            Action::SetFilters(_) => "SET_FILTERS",
            Action::SetSearchResults(_) => "SET_SEARCH_RESULTS",
            Action::SetIsSearching(_) => "SET_IS_SEARCHING",
            Action::ResetGallery => "RESET_GALLERY",
        }
    }
}

/// Applies one action and returns the next state.
///
/// Pure: the result depends only on the inputs.
#[must_use]
pub fn reduce(state: GalleryState, action: Action) -> GalleryState {
    match action {
        Action::SetTabs(tabs) => GalleryState { tabs, ..state },
        Action::SetActiveTab(index) => GalleryState {
            active_tab: Some(index),
            ..state
        },
        Action::SetBreadcrumb(breadcrumb) => GalleryState { breadcrumb, ..state },
        Action::SetMedia(media) => GalleryState { media, ..state },
        Action::AppendMedia(more) => {
            let mut media = state.media;
            media.extend(more);
            GalleryState { media, ..state }
        }
        Action::SetPagination(pagination) => GalleryState { pagination, ..state },
        Action::SetLoading(loading) => GalleryState { loading, ..state },
        Action::SetError(error) => GalleryState {
            error: Some(error),
            ..state
        },
        Action::ClearError => GalleryState {
            error: None,
            ..state
        },
        Action::SetSearchQuery(search_query) => GalleryState {
            search_query,
            ..state
        },
        Action::SetFilters(filters) => GalleryState { filters, ..state },
        Action::SetSearchResults(search_results) => GalleryState {
            search_results,
            ..state
        },
        Action::SetIsSearching(is_searching) => GalleryState {
            is_searching,
            ..state
        },
        Action::ResetGallery => GalleryState {
            media: Vec::new(),
            pagination: PaginationInfo::default(),
            search_results: Vec::new(),
            is_searching: false,
            ..state
        },
    }
}

/// Number of action tags remembered by default.
const DEFAULT_JOURNAL_CAPACITY: usize = 64;

/// Owns the state of one gallery and applies dispatched actions in order.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    state: GalleryState,
    journal: VecDeque<&'static str>,
    journal_capacity: usize,
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new(GalleryState::default())
    }
}

impl GalleryStore {
    /// A store starting from `initial` with a bounded action journal.
    #[must_use]
    pub fn new(initial: GalleryState) -> Self {
        Self {
            state: initial,
            journal: VecDeque::with_capacity(DEFAULT_JOURNAL_CAPACITY),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Reduces `action` into the state and records its tag.
    pub fn dispatch(&mut self, action: Action) {
        let tag = action.tag();
        log::trace!("[GalleryStore] dispatch {tag}");
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(tag);
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }

    /// Dispatches `actions` in order.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Tags of the most recent dispatches, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<&'static str> {
        self.journal.iter().copied().collect()
    }

    /// Forgets the recorded action tags.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }
}
