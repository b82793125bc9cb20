// SPDX-License-Identifier: MPL-2.0
//! Debounced free-text search.
//!
//! Every keystroke restarts the debounce window; only the last query of a
//! burst is searched. A blank query disables search at once, without
//! waiting for the window. Recent results are kept in an LRU cache so
//! repeating a query does not hit the network.
//!
//! [`Debouncer`] is a pure state machine over [`Instant`]s. [`spawn_debouncer`]
//! drives the same rules on the tokio timer for runtime use.

use super::store::Action;
use crate::config::{SearchConfig, MAX_SEARCH_CACHE_CAPACITY, MIN_SEARCH_CACHE_CAPACITY};
use crate::domain::gallery::GalleryMediaItem;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Returns true if `query` disables search.
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

// =============================================================================
// Debouncer
// =============================================================================

/// Trailing-edge debouncer for search input.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// A debouncer firing `delay` after the last keystroke.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Registers a keystroke. Returns the new deadline, or `None` when the
    /// query is blank and the pending search was dropped.
    pub fn on_input(&mut self, query: &str, now: Instant) -> Option<Instant> {
        if is_blank(query) {
            self.pending = None;
            return None;
        }
        let deadline = now + self.delay;
        self.pending = Some((query.to_string(), deadline));
        Some(deadline)
    }

    /// Returns the pending query if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(query, _)| query),
            _ => None,
        }
    }

    /// When the pending query becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Drops the pending query.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

// =============================================================================
// SearchController
// =============================================================================

/// Result of one keystroke.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOutcome {
    /// Dispatches to apply immediately.
    pub actions: Vec<Action>,
    /// When the debounced search becomes due, if one is pending.
    pub deadline: Option<Instant>,
}

/// Search input handling plus the result cache.
#[derive(Debug)]
pub struct SearchController {
    debouncer: Debouncer,
    cache: LruCache<String, Vec<GalleryMediaItem>>,
}

impl SearchController {
    /// Builds the debouncer and cache from `config`. The capacity is clamped.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        let capacity = config
            .cache_capacity
            .clamp(MIN_SEARCH_CACHE_CAPACITY, MAX_SEARCH_CACHE_CAPACITY);
        Self {
            debouncer: Debouncer::new(config.debounce()),
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Handles a keystroke in the search box.
    pub fn on_input(&mut self, query: &str, now: Instant) -> InputOutcome {
        let mut actions = vec![Action::SetSearchQuery(query.to_string())];
        let deadline = self.debouncer.on_input(query, now);
        if deadline.is_none() {
            actions.extend(Self::clear_actions());
        }
        InputOutcome { actions, deadline }
    }

    /// Returns the query whose debounce window has elapsed, if any.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    /// When the pending query becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Drops the pending query.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    /// Dispatches that disable search mode.
    #[must_use]
    pub fn clear_actions() -> Vec<Action> {
        vec![
            Action::SetSearchResults(Vec::new()),
            Action::SetIsSearching(false),
        ]
    }

    /// Dispatches that show `results` in search mode.
    #[must_use]
    pub fn results_actions(results: Vec<GalleryMediaItem>) -> Vec<Action> {
        vec![
            Action::SetSearchResults(results),
            Action::SetIsSearching(true),
        ]
    }

    /// Cached results for `query`, refreshing its recency.
    pub fn cached(&mut self, query: &str) -> Option<Vec<GalleryMediaItem>> {
        self.cache.get(query.trim()).cloned()
    }

    /// Caches `results` for `query`.
    pub fn remember(&mut self, query: &str, results: Vec<GalleryMediaItem>) {
        self.cache.put(query.trim().to_string(), results);
    }

    /// Drops cached results, used when the project or tabs are reloaded.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

// =============================================================================
// Async driver
// =============================================================================

/// Output of the async debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A quiet period elapsed after this query.
    Search(String),
    /// The input became blank; search is disabled immediately.
    Cleared,
}

/// Spawns a task applying the debounce rules to a stream of raw input.
///
/// Send every keystroke's full query into the returned sender; debounced
/// [`SearchEvent`]s come out of the receiver. The task ends when the sender
/// is dropped, flushing nothing that is still pending.
pub fn spawn_debouncer(
    delay: Duration,
) -> (mpsc::UnboundedSender<String>, mpsc::UnboundedReceiver<SearchEvent>) {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut pending: Option<String> = None;
        loop {
            let next = match pending.take() {
                None => input_rx.recv().await,
                Some(query) => {
                    tokio::select! {
                        next = input_rx.recv() => next,
                        () = tokio::time::sleep(delay) => {
                            if event_tx.send(SearchEvent::Search(query)).is_err() {
                                break;
                            }
                            continue;
                        }
                    }
                }
            };

            let Some(query) = next else {
                break;
            };

            if is_blank(&query) {
                if event_tx.send(SearchEvent::Cleared).is_err() {
                    break;
                }
            } else {
                pending = Some(query);
            }
        }
        log::trace!("[SearchDebouncer] input closed");
    });

    (input_tx, event_rx)
}
