// SPDX-License-Identifier: MPL-2.0
//! Request generations for out-of-order response protection.
//!
//! Each fetch is stamped with a generation that increases monotonically per
//! [`RequestKind`]. When the response arrives, it is applied only if no newer
//! request of the same kind has been issued since. Requests are never
//! aborted; stale responses are simply dropped.

/// Category of fetch. Generations are tracked independently per kind so a
/// search does not invalidate an in-flight page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Project,
    Tabs,
    MediaPage,
    Search,
}

impl RequestKind {
    const COUNT: usize = 4;

    fn slot(self) -> usize {
        match self {
            RequestKind::Project => 0,
            RequestKind::Tabs => 1,
            RequestKind::MediaPage => 2,
            RequestKind::Search => 3,
        }
    }
}

/// Stamp attached to an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
}

/// Issues and validates [`RequestTicket`]s.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: [u64; RequestKind::COUNT],
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, superseding every earlier ticket of that kind.
    pub fn issue(&mut self, kind: RequestKind) -> RequestTicket {
        let slot = &mut self.latest[kind.slot()];
        *slot += 1;
        RequestTicket {
            kind,
            generation: *slot,
        }
    }

    /// Returns true if `ticket` is still the latest of its kind.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest[ticket.kind.slot()] == ticket.generation
    }

    /// Invalidates every outstanding ticket of `kind` without issuing a new
    /// request. Used when a blank query disables search.
    pub fn invalidate(&mut self, kind: RequestKind) {
        self.latest[kind.slot()] += 1;
    }
}
