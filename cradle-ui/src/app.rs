//! App Root Component
//!
//! Shell layout (header, sidebar, footer) and the route table.

use leptos::*;
use leptos_router::*;

use cradle::api::CareApi;
use cradle::shell::Route as Destination;

use crate::components::{Header, Sidebar};
use crate::pages::{
    DashboardPage, FeedingPage, GrowthPage, NotFound, SleepPage, UploadPage, VomitPage,
};
use crate::state::{provide_app_context, use_app_context};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_context();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                <Header />

                <div class="flex flex-1">
                    <Sidebar />

                    <main class="flex-1 min-w-0 px-4 py-8 pb-24 md:px-8">
                        <Routes>
                            <Route path=Destination::Dashboard.path() view=DashboardPage />
                            <Route path=Destination::Sleep.path() view=SleepPage />
                            <Route path=Destination::Feeding.path() view=FeedingPage />
                            <Route path=Destination::Vomit.path() view=VomitPage />
                            <Route path=Destination::Growth.path() view=GrowthPage />
                            <Route path=Destination::Upload.path() view=UploadPage />
                            <Route path=Destination::NotFound.path() view=NotFound />
                        </Routes>
                    </main>
                </div>

                <Footer />
            </div>
        </Router>
    }
}

/// Footer showing which backend is in use and whether it answers
#[component]
fn Footer() -> impl IntoView {
    let ctx = use_app_context();
    let healthy = create_rw_signal(None::<bool>);
    let checked_at = create_rw_signal(None::<String>);

    // re-check whenever the backend URL changes
    create_effect(move |_| {
        let api = ctx.api.get();
        spawn_local(async move {
            let ok = matches!(api.health().await, Ok(h) if h.is_healthy());
            healthy.set(Some(ok));
            checked_at.set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
        });
    });

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-white border-t border-gray-200 py-3 px-4">
            <div class="flex items-center justify-between text-sm text-gray-500">
                <div class="flex items-center space-x-2">
                    {move || match healthy.get() {
                        Some(true) => view! {
                            <span class="flex items-center space-x-1 text-green-600">
                                <span class="w-2 h-2 bg-green-500 rounded-full" />
                                <span>"接続中"</span>
                            </span>
                        }.into_view(),
                        Some(false) => view! {
                            <span class="flex items-center space-x-1 text-red-600">
                                <span class="w-2 h-2 bg-red-500 rounded-full" />
                                <span>"未接続"</span>
                            </span>
                        }.into_view(),
                        None => view! { <span>"確認中..."</span> }.into_view(),
                    }}
                    <span class="font-mono text-xs">{move || ctx.api.get().base_url().to_string()}</span>
                </div>
                <div>
                    {move || checked_at.get().map(|t| format!("最終確認: {}", t))}
                </div>
            </div>
        </footer>
    }
}
