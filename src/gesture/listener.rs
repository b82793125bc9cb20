// SPDX-License-Identifier: MPL-2.0
//! Scoped event listeners.
//!
//! A [`ListenerRegistry`] fans events out to subscribed handlers. Each
//! subscription returns a [`Subscription`] guard; dropping the guard detaches
//! the handler, so a component that owns its guards can never leak a
//! listener past its own lifetime.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Handler<E> = Box<dyn FnMut(&E) + Send>;

struct Slots<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Slots<E> {
    fn remove(&mut self, id: u64) {
        self.handlers.retain(|(slot, _)| *slot != id);
    }
}

fn lock<E>(slots: &Mutex<Slots<E>>) -> MutexGuard<'_, Slots<E>> {
    // A panicking handler must not disable every other listener.
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Event source with RAII-scoped handlers.
///
/// Handlers run while the registry is locked. They must not subscribe to or
/// drop subscriptions of the same registry; forward the event to a queue
/// instead.
pub struct ListenerRegistry<E> {
    slots: Arc<Mutex<Slots<E>>>,
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<E: 'static> ListenerRegistry<E> {
    /// A registry with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `handler` until the returned guard is dropped.
    #[must_use = "dropping the subscription detaches the handler immediately"]
    pub fn subscribe(&self, handler: impl FnMut(&E) + Send + 'static) -> Subscription {
        let mut slots = lock(&self.slots);
        let id = slots.next_id;
        slots.next_id += 1;
        slots.handlers.push((id, Box::new(handler)));

        let weak: Weak<Mutex<Slots<E>>> = Arc::downgrade(&self.slots);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    lock(&slots).remove(id);
                }
            })),
        }
    }

    /// Delivers `event` to every attached handler. Returns how many ran.
    pub fn emit(&self, event: &E) -> usize {
        let mut slots = lock(&self.slots);
        for (_, handler) in &mut slots.handlers {
            handler(event);
        }
        slots.handlers.len()
    }
}

impl<E> ListenerRegistry<E> {
    /// Number of attached handlers.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.slots).handlers.len()
    }
}

/// Guard for one attached handler. Detaches on drop.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Detaches now instead of at end of scope.
    pub fn cancel(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}
