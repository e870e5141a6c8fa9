//! State Management
//!
//! App-wide context and the per-page fetch hook.

pub mod page;

use leptos::*;
use std::rc::Rc;

use cradle::shell::SidebarState;

use crate::api::GlooClient;

pub use page::{use_page_state, PageState};

/// Shared by the shell and every page
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Replaced when the backend URL is changed on the upload page
    pub api: RwSignal<Rc<GlooClient>>,
    pub sidebar: RwSignal<SidebarState>,
}

/// Current window width in CSS pixels
pub fn viewport_width() -> f64 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(cradle::shell::SMALL_VIEWPORT_MAX_WIDTH)
}

/// Provide the app context to the component tree
pub fn provide_app_context() -> AppContext {
    let ctx = AppContext {
        api: create_rw_signal(Rc::new(GlooClient::from_storage())),
        sidebar: create_rw_signal(SidebarState::for_width(viewport_width())),
    };
    provide_context(ctx);
    ctx
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
