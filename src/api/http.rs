// SPDX-License-Identifier: MPL-2.0
//! [`GalleryApi`] over HTTP.

use super::{Envelope, GalleryApi, GalleryData, MediaPage, ProjectSummary, SearchData};
use crate::config::ApiConfig;
use crate::domain::gallery::{ProjectId, TabId};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Gallery API client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGalleryApi {
    client: Client,
    base_url: String,
}

impl HttpGalleryApi {
    /// Builds a client for `config.base_url` with the configured timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Uses an existing `reqwest` client, e.g. to share its connection pool.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("[GalleryApi] Using base URL: {base_url}");
        Self { client, base_url }
    }

    /// Base URL without its trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(segments)?;
        debug!("[GalleryApi] GET {url} {query:?}");

        let response = self.client.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("[GalleryApi] GET {url} failed with status {status}");
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|err| {
            warn!("[GalleryApi] GET {url} returned an unreadable body: {err}");
            Error::from(err)
        })?;
        envelope.into_data()
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn resolve_slug(&self, slug: &str) -> Result<ProjectSummary> {
        self.get(&["api", "projects", "slug", slug], &[]).await
    }

    async fn gallery(&self, project: ProjectId) -> Result<GalleryData> {
        let project = project.to_string();
        self.get(&["api", "projects", &project, "gallery"], &[])
            .await
    }

    async fn media_page(
        &self,
        project: ProjectId,
        tab: TabId,
        page: u32,
        limit: u32,
    ) -> Result<MediaPage> {
        let (project, tab) = (project.to_string(), tab.to_string());
        self.get(
            &["api", "projects", &project, "gallery", &tab],
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn search(&self, project: ProjectId, query: &str) -> Result<SearchData> {
        let project = project.to_string();
        self.get(
            &["api", "projects", &project, "gallery", "search"],
            &[("q", query.to_string())],
        )
        .await
    }
}
