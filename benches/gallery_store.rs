// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery state transitions.
//!
//! Measures the performance of:
//! - Appending pages of media through the reducer
//! - A full tab switch (resolve, dispatch, first page)
//! - Building the grid view with filters applied

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use estate_gallery::config::GridConfig;
use estate_gallery::domain::gallery::{
    FilterOptions, GalleryMediaItem, MediaKind, PaginationInfo, TabId, TabItem,
};
use estate_gallery::gallery::grid::MediaGridLoader;
use estate_gallery::gallery::store::{reduce, Action, GalleryState, GalleryStore};
use estate_gallery::gallery::tabs;
use std::hint::black_box;

fn page(first_id: u64, count: u64) -> Vec<GalleryMediaItem> {
    (first_id..first_id + count)
        .map(|id| GalleryMediaItem::image(id, format!("Media {id}"), format!("/uploads/{id}.jpg")))
        .collect()
}

fn tabs_fixture(count: u64) -> Vec<TabItem> {
    (1..=count)
        .map(|id| {
            TabItem::new(id, format!("Tab {id}"), 48).with_sub_tabs(vec![
                TabItem::new(id * 100 + 1, format!("Tab {id}.1"), 24),
                TabItem::new(id * 100 + 2, format!("Tab {id}.2"), 24),
            ])
        })
        .collect()
}

/// Appending successive pages, as infinite scroll does.
fn bench_append_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_store");

    for pages in [1_u32, 10, 50] {
        group.bench_with_input(BenchmarkId::new("append_pages", pages), &pages, |b, &pages| {
            b.iter(|| {
                let mut store = GalleryStore::default();
                for number in 1..=pages {
                    let first = u64::from(number - 1) * 12;
                    store.dispatch(Action::AppendMedia(page(first, 12)));
                    store.dispatch(Action::SetPagination(PaginationInfo::new(number, 12, 600)));
                }
                black_box(store.state().media.len());
            });
        });
    }

    group.finish();
}

/// Resolving and applying a sub-tab click.
fn bench_tab_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_store");
    let state = reduce(GalleryState::default(), Action::SetTabs(tabs_fixture(20)));

    group.bench_function("sub_tab_switch", |b| {
        b.iter(|| {
            let change = tabs::on_tab_change(&state, TabId(1502)).expect("tab exists");
            let next = change.actions.into_iter().fold(state.clone(), reduce);
            black_box(reduce(next, Action::SetMedia(page(0, 12))));
        });
    });

    group.finish();
}

/// Building the grid rows with a media-type filter.
fn bench_grid_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_store");
    let state = [
        Action::SetMedia(page(0, 600)),
        Action::SetFilters(FilterOptions {
            media_type: Some(MediaKind::Image),
            ..FilterOptions::default()
        }),
    ]
    .into_iter()
    .fold(GalleryState::default(), reduce);
    let grid = MediaGridLoader::new(GridConfig::default(), 1280.0);

    group.bench_function("grid_view_600", |b| {
        b.iter(|| {
            black_box(grid.view(&state));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_append_pages, bench_tab_switch, bench_grid_view);
criterion_main!(benches);
