//! Page Fetch Hook
//!
//! Wires a loader from `cradle::pages` into a signal: fetch on mount, drop
//! results once the page unmounts, re-fetch on retry.

use leptos::*;
use std::future::Future;
use std::rc::Rc;

use cradle::api::ClientError;
use cradle::view::{drive, FetchTracker, Loaded, ViewState};

use super::use_app_context;
use crate::api::GlooClient;
use crate::components::{EmptyState, ErrorBanner, Loading};

/// View state of one mounted page plus its retry handle
pub struct PageState<T: 'static> {
    pub state: RwSignal<ViewState<T>>,
    pub reload: Callback<()>,
}

impl<T: 'static> Clone for PageState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for PageState<T> {}

/// Start `load` now and again on every `reload`.
///
/// Each run goes through [`drive`], so only the latest cycle of a still
/// mounted page ever touches the signal.
pub fn use_page_state<T, F, Fut>(load: F) -> PageState<T>
where
    T: Clone + 'static,
    F: Fn(Rc<GlooClient>) -> Fut + 'static,
    Fut: Future<Output = Result<Loaded<T>, ClientError>> + 'static,
{
    let ctx = use_app_context();
    let state = create_rw_signal(ViewState::Loading);
    let tracker = FetchTracker::new();

    let cleanup_tracker = tracker.clone();
    on_cleanup(move || cleanup_tracker.dispose());

    let load = Rc::new(load);
    let run = move || {
        let tracker = tracker.clone();
        let fut = load(ctx.api.get_untracked());
        spawn_local(async move {
            drive(&tracker, |s| state.set(s), fut).await;
        });
    };

    run();
    PageState {
        state,
        reload: Callback::new(move |_| run()),
    }
}

impl<T: Clone + 'static> PageState<T> {
    /// Render Loading, Error, Empty, or `ready` for the payload
    pub fn render<V, R>(self, ready: R) -> impl IntoView
    where
        V: IntoView,
        R: Fn(T) -> V + 'static,
    {
        let reload = self.reload;
        move || match self.state.get() {
            ViewState::Loading => view! { <Loading /> }.into_view(),
            ViewState::Error(e) => view! {
                <ErrorBanner message=e.message retryable=e.retryable on_retry=reload />
            }
            .into_view(),
            ViewState::Empty => view! { <EmptyState /> }.into_view(),
            ViewState::Ready(value) => ready(value).into_view(),
        }
    }
}
