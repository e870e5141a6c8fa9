//! Empty State Component

use leptos::*;
use leptos_router::*;

use cradle::shell::Route as Destination;

/// Shown when the backend answered but has no data yet
#[component]
pub fn EmptyState(
    #[prop(into, default = "表示できるデータがありません。".to_string())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center text-center py-16 bg-white rounded-xl border border-dashed border-gray-300">
            <div class="text-5xl mb-4">"📄"</div>
            <p class="text-gray-600 mb-6">{message}</p>
            <A
                href=Destination::Upload.path()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
            >
                "ログファイルを取り込む"
            </A>
        </div>
    }
}
