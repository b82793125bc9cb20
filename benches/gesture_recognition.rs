// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for touch gesture classification and lightbox input handling.

use criterion::{criterion_group, criterion_main, Criterion};
use estate_gallery::config::LightboxConfig;
use estate_gallery::domain::gallery::{LightboxImage, MediaId};
use estate_gallery::gesture::{SwipeThresholds, TouchEvent, TouchGestureRecognizer};
use estate_gallery::lightbox::{Lightbox, Message};
use estate_gallery::ui::geometry::Point;
use std::hint::black_box;
use std::time::Duration;

fn swipe_events(steps: u32) -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::Start {
        touches: vec![Point::new(400.0, 300.0)],
        time: Duration::ZERO,
    }];
    for step in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let x = 400.0 - step as f32 * 8.0;
        events.push(TouchEvent::Move {
            touches: vec![Point::new(x, 300.0)],
            time: Duration::from_millis(u64::from(step) * 16),
        });
    }
    events.push(TouchEvent::End {
        touches: vec![],
        time: Duration::from_millis(u64::from(steps + 1) * 16),
    });
    events
}

fn pinch_events(steps: u32) -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::Start {
        touches: vec![Point::new(300.0, 300.0), Point::new(500.0, 300.0)],
        time: Duration::ZERO,
    }];
    for step in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let spread = step as f32 * 4.0;
        events.push(TouchEvent::Move {
            touches: vec![
                Point::new(300.0 - spread, 300.0),
                Point::new(500.0 + spread, 300.0),
            ],
            time: Duration::from_millis(u64::from(step) * 16),
        });
    }
    events.push(TouchEvent::End {
        touches: vec![],
        time: Duration::from_millis(u64::from(steps + 1) * 16),
    });
    events
}

fn bench_recognizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_recognition");
    let swipe = swipe_events(30);
    let pinch = pinch_events(30);

    group.bench_function("classify_swipe", |b| {
        b.iter(|| {
            let mut recognizer = TouchGestureRecognizer::new(SwipeThresholds::default());
            for event in &swipe {
                black_box(recognizer.handle(event));
            }
        });
    });

    group.bench_function("classify_pinch", |b| {
        b.iter(|| {
            let mut recognizer = TouchGestureRecognizer::new(SwipeThresholds::default());
            for event in &pinch {
                black_box(recognizer.handle(event));
            }
        });
    });

    group.finish();
}

fn bench_lightbox_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_recognition");
    let images: Vec<LightboxImage> = (1..=50)
        .map(|id| LightboxImage {
            id: MediaId(id),
            url: format!("/uploads/{id}.jpg"),
            alt: String::new(),
            title: format!("Image {id}"),
        })
        .collect();
    let config = LightboxConfig::default();
    let swipe = swipe_events(30);

    group.bench_function("lightbox_swipe_navigation", |b| {
        b.iter(|| {
            let mut lightbox =
                Lightbox::open(images.clone(), 0, &config, false).expect("non-empty");
            for event in &swipe {
                black_box(lightbox.handle(Message::Touch(event.clone())));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_recognizer, bench_lightbox_touch);
criterion_main!(benches);
