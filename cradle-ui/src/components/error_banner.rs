//! Error Banner Component

use leptos::*;

/// Failure message with an optional retry button
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: String,
    #[prop(default = true)]
    retryable: bool,
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let retry = on_retry.filter(|_| retryable);

    view! {
        <div class="flex items-start justify-between gap-4 bg-red-50 border border-red-200 text-red-800 rounded-lg p-4" role="alert">
            <div class="flex items-start space-x-3">
                <span class="text-lg">"⚠"</span>
                <p class="text-sm">{message}</p>
            </div>
            {retry.map(|cb| view! {
                <button
                    on:click=move |_| cb.call(())
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg text-sm font-medium transition-colors"
                >
                    "再試行"
                </button>
            })}
        </div>
    }
}
