// SPDX-License-Identifier: MPL-2.0
//! Tab and breadcrumb navigation.
//!
//! Resolves tab clicks (root tabs, nested sub-tabs, breadcrumb shortcuts)
//! into the ordered store dispatches plus the first-page fetch, builds the
//! tab bar view model, and computes the scroll needed to keep the active
//! tab button visible.

use super::store::{Action, GalleryState};
use crate::domain::gallery::{BreadcrumbItem, TabId, TabItem};
use crate::ui::geometry::Rect;

/// Outcome of a successful tab change.
#[derive(Debug, Clone, PartialEq)]
pub struct TabChange {
    /// Dispatches to apply, in order.
    pub actions: Vec<Action>,
    /// Tab whose first page must be fetched.
    pub fetch: TabId,
}

/// Finds the path from a root tab down to `id`, inclusive.
#[must_use]
pub fn find_path(tabs: &[TabItem], id: TabId) -> Option<Vec<&TabItem>> {
    for tab in tabs {
        if tab.id == id {
            return Some(vec![tab]);
        }
        if let Some(mut rest) = find_path(&tab.sub_tabs, id) {
            rest.insert(0, tab);
            return Some(rest);
        }
    }
    None
}

/// Builds the breadcrumb trail for `id`, or an empty trail if unknown.
#[must_use]
pub fn breadcrumb_for(tabs: &[TabItem], id: TabId) -> Vec<BreadcrumbItem> {
    find_path(tabs, id)
        .map(|path| path.into_iter().map(BreadcrumbItem::from).collect())
        .unwrap_or_default()
}

/// Resolves a click on tab `tab_id`.
///
/// Returns `None` when the id is unknown; navigation is then a no-op.
/// On success the dispatch order is `SetActiveTab`, `ResetGallery`,
/// `SetBreadcrumb`, after which the caller fetches page one of `fetch`.
#[must_use]
pub fn on_tab_change(state: &GalleryState, tab_id: TabId) -> Option<TabChange> {
    let path = find_path(&state.tabs, tab_id)?;
    let root_id = path.first()?.id;
    let index = state.tabs.iter().position(|tab| tab.id == root_id)?;
    let breadcrumb = path.into_iter().map(BreadcrumbItem::from).collect();

    Some(TabChange {
        actions: vec![
            Action::SetActiveTab(index),
            Action::ResetGallery,
            Action::SetBreadcrumb(breadcrumb),
        ],
        fetch: tab_id,
    })
}

/// A breadcrumb click behaves exactly like a click on the target tab.
#[must_use]
pub fn on_breadcrumb_click(state: &GalleryState, tab_id: TabId) -> Option<TabChange> {
    on_tab_change(state, tab_id)
}

/// Children of the active root tab.
#[must_use]
pub fn sub_tabs_of_active(state: &GalleryState) -> &[TabItem] {
    state
        .active_root()
        .map_or(&[][..], |tab| tab.sub_tabs.as_slice())
}

// =============================================================================
// View model
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TabEntry {
    pub id: TabId,
    pub title: String,
    pub media_count: u32,
    pub is_active: bool,
    pub has_sub_tabs: bool,
}

/// What the tab area should render.
#[derive(Debug, Clone, PartialEq)]
pub enum TabBar {
    /// No categories exist; render the "no category" placeholder.
    Empty,
    Tabs {
        tabs: Vec<TabEntry>,
        sub_tabs: Vec<TabEntry>,
        breadcrumb: Vec<BreadcrumbItem>,
    },
}

/// Placeholder text for [`TabBar::Empty`].
pub const NO_CATEGORY_PLACEHOLDER: &str = "No gallery category has been added yet.";

impl TabBar {
    /// Builds the tab strip for `state`.
    #[must_use]
    pub fn from_state(state: &GalleryState) -> Self {
        if state.tabs.is_empty() {
            return TabBar::Empty;
        }

        let selected = state.current_tab_id();
        let entry = |tab: &TabItem, is_active: bool| TabEntry {
            id: tab.id,
            title: tab.title.clone(),
            media_count: tab.media_count,
            is_active,
            has_sub_tabs: tab.has_sub_tabs(),
        };

        let tabs = state
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| entry(tab, state.active_tab == Some(index)))
            .collect();
        let sub_tabs = sub_tabs_of_active(state)
            .iter()
            .map(|tab| entry(tab, selected == Some(tab.id)))
            .collect();

        TabBar::Tabs {
            tabs,
            sub_tabs,
            breadcrumb: state.breadcrumb.clone(),
        }
    }
}

// =============================================================================
// Auto-scroll
// =============================================================================

/// Horizontal scroll the tab strip should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub left: f32,
    pub smooth: bool,
}

/// Computes the scroll that centers `button` in `container`, or `None` if
/// the button is already fully visible.
///
/// Both rectangles are in viewport coordinates; `scroll_left` is the
/// container's current horizontal scroll offset.
#[must_use]
pub fn scroll_into_view(button: Rect, container: Rect, scroll_left: f32) -> Option<ScrollTarget> {
    if container.contains_horizontally(&button) {
        return None;
    }
    let offset_in_content = scroll_left + (button.x - container.x);
    let left = offset_in_content - (container.width - button.width) / 2.0;
    Some(ScrollTarget {
        left: left.max(0.0),
        smooth: true,
    })
}

/// Remembers which active index was last scrolled into view so the scroll
/// runs once per change, not on every layout pass.
#[derive(Debug, Clone, Default)]
pub struct TabNavigator {
    scrolled_for: Option<usize>,
}

impl TabNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after layout with the active button's bounds.
    pub fn auto_scroll(
        &mut self,
        active: Option<usize>,
        button: Rect,
        container: Rect,
        scroll_left: f32,
    ) -> Option<ScrollTarget> {
        if active.is_none() || active == self.scrolled_for {
            return None;
        }
        self.scrolled_for = active;
        scroll_into_view(button, container, scroll_left)
    }
}
