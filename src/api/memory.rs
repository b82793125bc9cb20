// SPDX-License-Identifier: MPL-2.0
//! In-memory [`GalleryApi`].
//!
//! Serves one project from fixed data with the same paging and search
//! semantics as the server. Used for offline demos and for driving the
//! controller in tests; individual calls can be made to fail and every call
//! is recorded.

use super::{GalleryApi, GalleryData, MediaPage, ProjectSummary, SearchData};
use crate::domain::gallery::{GalleryMediaItem, PaginationInfo, ProjectId, TabId, TabItem};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ResolveSlug(String),
    Gallery(ProjectId),
    MediaPage { tab: TabId, page: u32, limit: u32 },
    Search(String),
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<ApiCall>,
    fail_next: usize,
}

#[derive(Debug)]
pub struct InMemoryGalleryApi {
    project: ProjectSummary,
    tabs: Vec<TabItem>,
    media: HashMap<TabId, Vec<GalleryMediaItem>>,
    recorder: Mutex<Recorder>,
}

impl InMemoryGalleryApi {
    /// A project reachable as `slug` with the given tab tree and no media.
    #[must_use]
    pub fn new(id: ProjectId, slug: &str, tabs: Vec<TabItem>) -> Self {
        Self {
            project: ProjectSummary {
                id,
                title: None,
                slug: Some(slug.to_string()),
            },
            tabs,
            media: HashMap::new(),
            recorder: Mutex::new(Recorder::default()),
        }
    }

    /// Sets the media served for `tab`.
    #[must_use]
    pub fn with_media(mut self, tab: TabId, media: Vec<GalleryMediaItem>) -> Self {
        self.media.insert(tab, media);
        self
    }

    /// Makes the next `count` calls fail with a 500 status.
    pub fn fail_next(&self, count: usize) {
        self.recorder().fail_next = count;
    }

    /// Calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.recorder().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.recorder().calls.clear();
    }

    fn recorder(&self) -> MutexGuard<'_, Recorder> {
        self.recorder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: ApiCall) -> Result<()> {
        let mut recorder = self.recorder();
        let path = format!("{call:?}");
        recorder.calls.push(call);
        if recorder.fail_next > 0 {
            recorder.fail_next -= 1;
            return Err(Error::Status { status: 500, url: path });
        }
        Ok(())
    }

    fn check_project(&self, project: ProjectId) -> Result<()> {
        if project == self.project.id {
            Ok(())
        } else {
            Err(Error::Status {
                status: 404,
                url: format!("project {project}"),
            })
        }
    }
}

#[async_trait]
impl GalleryApi for InMemoryGalleryApi {
    async fn resolve_slug(&self, slug: &str) -> Result<ProjectSummary> {
        self.record(ApiCall::ResolveSlug(slug.to_string()))?;
        if self.project.slug.as_deref() == Some(slug) {
            Ok(self.project.clone())
        } else {
            Err(Error::Status {
                status: 404,
                url: format!("slug {slug}"),
            })
        }
    }

    async fn gallery(&self, project: ProjectId) -> Result<GalleryData> {
        self.record(ApiCall::Gallery(project))?;
        self.check_project(project)?;
        Ok(GalleryData {
            tabs: self.tabs.clone(),
            breadcrumb: Vec::new(),
        })
    }

    async fn media_page(
        &self,
        project: ProjectId,
        tab: TabId,
        page: u32,
        limit: u32,
    ) -> Result<MediaPage> {
        self.record(ApiCall::MediaPage { tab, page, limit })?;
        self.check_project(project)?;

        let all = self.media.get(&tab).map_or(&[][..], Vec::as_slice);
        let page = page.max(1);
        let limit = limit.max(1);
        let start = ((page - 1) as usize).saturating_mul(limit as usize);
        let media = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let total = u32::try_from(all.len()).unwrap_or(u32::MAX);
        Ok(MediaPage {
            media,
            pagination: PaginationInfo::new(page, limit, total),
        })
    }

    async fn search(&self, project: ProjectId, query: &str) -> Result<SearchData> {
        self.record(ApiCall::Search(query.to_string()))?;
        self.check_project(project)?;

        let needle = query.trim().to_lowercase();
        let mut tab_ids: Vec<&TabId> = self.media.keys().collect();
        tab_ids.sort();
        let results = tab_ids
            .into_iter()
            .filter_map(|id| self.media.get(id))
            .flatten()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(SearchData { results })
    }
}
