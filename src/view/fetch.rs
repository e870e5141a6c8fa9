//! Fetch Cycle
//!
//! Runs a page loader and publishes the resulting [`ViewState`]s, guarding
//! against two stale-update cases:
//!
//! - the page was disposed while its request was in flight
//! - a retry started a newer cycle before the older one finished
//!
//! In both cases the late result is dropped instead of being applied.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::{ErrorView, Loaded, ViewState};
use crate::api::ClientError;

/// Identifies one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Tracks the current cycle of one mounted page
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    generation: Arc<AtomicU64>,
    disposed: Arc<AtomicBool>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, superseding any in flight
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether results for `ticket` may still be applied
    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.is_disposed() && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Mark the owning page as gone; all later updates are dropped
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// Run one fetch cycle.
///
/// Publishes `Loading`, awaits `load`, then publishes exactly one terminal
/// state, unless the tracker says the cycle is stale. Returns the terminal
/// state that was applied, or `None` if it was dropped. A tracker that is
/// already disposed gets no update at all and `load` is never polled.
pub async fn drive<T, F, Fut>(tracker: &FetchTracker, mut apply: F, load: Fut) -> Option<ViewState<T>>
where
    T: Clone,
    F: FnMut(ViewState<T>),
    Fut: Future<Output = Result<Loaded<T>, ClientError>>,
{
    if tracker.is_disposed() {
        tracing::debug!("Skipping fetch for a disposed page");
        return None;
    }
    let ticket = tracker.begin();
    apply(ViewState::Loading);

    let state = match load.await {
        Ok(Loaded::Ready(value)) => ViewState::Ready(value),
        Ok(Loaded::Empty) => ViewState::Empty,
        Err(e) => {
            tracing::warn!(error = %e, "Page fetch failed");
            ViewState::Error(ErrorView::from(&e))
        }
    };

    if tracker.is_current(ticket) {
        tracing::debug!(state = state.label(), "Fetch cycle finished");
        apply(state.clone());
        Some(state)
    } else {
        tracing::debug!(state = state.label(), "Dropping stale fetch result");
        None
    }
}
