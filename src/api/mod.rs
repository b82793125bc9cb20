// SPDX-License-Identifier: MPL-2.0
//! Gallery REST contract.
//!
//! The engine consumes four read-only endpoints:
//!
//! | Method | Path | Payload |
//! |---|---|---|
//! | GET | `/api/projects/slug/{slug}` | `{ data: { id, .. } }` |
//! | GET | `/api/projects/{id}/gallery` | `{ success, data: { tabs, breadcrumb } }` |
//! | GET | `/api/projects/{id}/gallery/{tabId}?page=&limit=` | `{ success, data: { media, pagination } }` |
//! | GET | `/api/projects/{id}/gallery/search?q=` | `{ success, data: { results } }` |
//!
//! [`GalleryApi`] abstracts them so the controller can run against the
//! HTTP client or an in-memory fake.

pub mod http;
pub mod memory;

pub use http::HttpGalleryApi;
pub use memory::{ApiCall, InMemoryGalleryApi};

use crate::domain::gallery::{
    BreadcrumbItem, GalleryMediaItem, PaginationInfo, ProjectId, TabId, TabItem,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Standard response wrapper.
///
/// `success` defaults to true because the slug endpoint omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, alias = "error", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// A successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Unwraps the payload, turning `success: false` or a missing `data`
    /// into [`Error::Api`].
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| Error::Api("response carried no data".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub tabs: Vec<TabItem>,
    #[serde(default)]
    pub breadcrumb: Vec<BreadcrumbItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub media: Vec<GalleryMediaItem>,
    #[serde(default)]
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub results: Vec<GalleryMediaItem>,
}

/// Read access to the gallery endpoints.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn resolve_slug(&self, slug: &str) -> Result<ProjectSummary>;

    async fn gallery(&self, project: ProjectId) -> Result<GalleryData>;

    async fn media_page(
        &self,
        project: ProjectId,
        tab: TabId,
        page: u32,
        limit: u32,
    ) -> Result<MediaPage>;

    async fn search(&self, project: ProjectId, query: &str) -> Result<SearchData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_envelope_is_an_api_error() {
        let envelope: Envelope<GalleryData> =
            serde_json::from_str(r#"{ "success": false, "error": "not found" }"#).expect("parse");
        match envelope.into_data() {
            Err(Error::Api(message)) => assert_eq!(message, "not found"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn slug_envelope_without_success_flag_is_ok() {
        let envelope: Envelope<ProjectSummary> =
            serde_json::from_str(r#"{ "data": { "id": 42, "title": "Marina Evleri" } }"#)
                .expect("parse");
        let project = envelope.into_data().expect("data");
        assert_eq!(project.id, ProjectId(42));
        assert_eq!(project.title.as_deref(), Some("Marina Evleri"));
    }

    #[test]
    fn media_page_parses_pagination() {
        let json = r#"{
            "success": true,
            "data": {
                "media": [{ "id": 1, "title": "Salon", "media": { "url": "/u/1.jpg", "type": "IMAGE" } }],
                "pagination": { "page": 1, "limit": 12, "total": 30, "hasMore": true }
            }
        }"#;
        let page = serde_json::from_str::<Envelope<MediaPage>>(json)
            .expect("parse")
            .into_data()
            .expect("data");
        assert_eq!(page.media.len(), 1);
        assert!(page.pagination.has_more);
    }

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Envelope<T> {
        serde_json::from_str(json).expect("parse")
    }

    #[test]
    fn payload_without_default_parses_when_data_is_absent() {
        let envelope: Envelope<ProjectSummary> =
            parse(r#"{ "success": false, "message": "gone" }"#);
        assert!(envelope.data.is_none());
        match envelope.into_data() {
            Err(Error::Api(message)) => assert_eq!(message, "gone"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_an_error() {
        let envelope: Envelope<SearchData> =
            serde_json::from_str(r#"{ "success": true }"#).expect("parse");
        assert!(envelope.into_data().is_err());
    }
}
