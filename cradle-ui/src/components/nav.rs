//! Navigation Components
//!
//! Header bar with the sidebar toggle, and the collapsible side navigation.

use leptos::*;
use leptos_router::*;

use cradle::shell::Route as Destination;

use crate::state::{use_app_context, viewport_width};

fn nav_icon(route: Destination) -> &'static str {
    match route {
        Destination::Dashboard => "📊",
        Destination::Sleep => "😴",
        Destination::Feeding => "🍼",
        Destination::Vomit => "🤢",
        Destination::Growth => "📈",
        Destination::Upload => "📤",
        Destination::NotFound => "❓",
    }
}

/// Header with brand, current page title and sidebar toggle
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let sidebar = ctx.sidebar;
    let location = use_location();
    let title = move || Destination::from_path(&location.pathname.get()).title();

    view! {
        <header class="bg-white border-b border-gray-200 sticky top-0 z-30">
            <div class="flex items-center h-16 px-4 space-x-4">
                <button
                    on:click=move |_| sidebar.update(|s| *s = s.toggle())
                    class="p-2 rounded-lg text-gray-600 hover:bg-gray-100 transition-colors"
                    aria-label="メニューを開閉"
                    aria-expanded=move || sidebar.get().is_open().to_string()
                >
                    "☰"
                </button>
                <A href=Destination::Dashboard.path() class="flex items-center space-x-2">
                    <span class="text-2xl">"👶"</span>
                    <span class="text-xl font-bold text-gray-900">"Cradle"</span>
                </A>
                <span class="text-gray-400">"/"</span>
                <span class="text-gray-700 font-medium">{title}</span>
            </div>
        </header>
    }
}

/// Side navigation; closes after a pick on small viewports
#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let sidebar = ctx.sidebar;

    view! {
        <aside
            class="w-56 shrink-0 bg-white border-r border-gray-200"
            class:hidden=move || !sidebar.get().is_open()
        >
            <nav class="p-3">
                <ul class="space-y-1">
                    {Destination::NAV
                        .into_iter()
                        .map(|route| view! {
                            <li on:click=move |_| sidebar.update(|s| *s = s.after_navigate(viewport_width()))>
                                <NavLink route=route />
                            </li>
                        })
                        .collect_view()}
                </ul>
            </nav>
        </aside>
    }
}

#[component]
fn NavLink(route: Destination) -> impl IntoView {
    view! {
        <A
            href=route.path()
            exact=true
            class="flex items-center space-x-3 px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100 transition-colors"
            active_class="bg-primary-50 text-primary-700"
        >
            <span>{nav_icon(route)}</span>
            <span>{route.title()}</span>
        </A>
    }
}
