// SPDX-License-Identifier: MPL-2.0
//! The controller driving the HTTP client against a mock server.

use estate_gallery::api::HttpGalleryApi;
use estate_gallery::config::{ApiConfig, Config};
use estate_gallery::domain::gallery::TabId;
use estate_gallery::error::GENERIC_FETCH_ERROR;
use estate_gallery::gallery::GridView;
use estate_gallery::GalleryController;
use mockito::{Matcher, Server};
use std::sync::Arc;

const TABS: &str = r#"{
    "success": true,
    "data": {
        "tabs": [
            { "id": 1, "title": "Dış Mekan", "mediaCount": 24, "subTabs": [] },
            { "id": 2, "title": "İç Mekan", "mediaCount": 30, "subTabs": [] }
        ],
        "breadcrumb": []
    }
}"#;

fn page_body(first_id: u64, page: u32, total: u32, has_more: bool) -> String {
    let media: Vec<String> = (first_id..first_id + 12)
        .map(|id| {
            format!(
                r#"{{ "id": {id}, "title": "Görsel {id}", "media": {{ "url": "/uploads/{id}.jpg", "type": "IMAGE" }} }}"#
            )
        })
        .collect();
    format!(
        r#"{{ "success": true, "data": {{ "media": [{}], "pagination": {{ "page": {page}, "limit": 12, "total": {total}, "hasMore": {has_more} }} }} }}"#,
        media.join(",")
    )
}

fn controller(server: &Server) -> GalleryController {
    let config = Config {
        api: ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        },
        ..Config::default()
    };
    let api = HttpGalleryApi::new(&config.api).expect("client builds");
    GalleryController::new(Arc::new(api), config, 1280.0)
}

#[tokio::test]
async fn slug_to_second_page_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/slug/deniz-konaklari")
        .with_body(r#"{ "data": { "id": 3 } }"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/projects/3/gallery")
        .with_body(TABS)
        .create_async()
        .await;
    server
        .mock("GET", "/api/projects/3/gallery/1")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(page_body(1, 1, 24, true))
        .create_async()
        .await;
    let second_tab_first = server
        .mock("GET", "/api/projects/3/gallery/2")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(page_body(100, 1, 30, true))
        .create_async()
        .await;
    let second_tab_second = server
        .mock("GET", "/api/projects/3/gallery/2")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_body(page_body(112, 2, 30, true))
        .create_async()
        .await;

    let mut gallery = controller(&server);
    gallery.load_project("deniz-konaklari").await.expect("project loads");
    assert_eq!(gallery.state().tabs.len(), 2);

    gallery.select_tab(TabId(2)).await.expect("tab loads");
    gallery.load_more().await.expect("page loads");

    let state = gallery.state();
    assert_eq!(state.media.len(), 24);
    assert_eq!(state.pagination.page, 2);
    assert!(state.pagination.has_more);
    second_tab_first.assert_async().await;
    second_tab_second.assert_async().await;
}

#[tokio::test]
async fn server_error_becomes_generic_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/projects/slug/kapali")
        .with_status(503)
        .create_async()
        .await;

    let mut gallery = controller(&server);
    assert!(gallery.load_project("kapali").await.is_err());
    assert_eq!(gallery.state().error.as_deref(), Some(GENERIC_FETCH_ERROR));
    match gallery.grid_view() {
        GridView::Error(message) => assert!(!message.contains("503")),
        other => panic!("expected error view, got {other:?}"),
    }
}
