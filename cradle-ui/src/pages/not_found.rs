//! 404 Page

use leptos::*;
use leptos_router::*;

use cradle::shell::Route as Destination;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">{Destination::NotFound.title()}</h1>
            <p class="text-gray-500 mb-6">"お探しのページは存在しません。"</p>
            <A
                href=Destination::Dashboard.path()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "ダッシュボードへ戻る"
            </A>
        </div>
    }
}
