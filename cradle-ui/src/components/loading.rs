//! Loading Component

use leptos::*;

/// Page-level loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-16 text-gray-500">
            <div class="loading-spinner w-8 h-8" />
            <span class="mt-3 text-sm">"読み込み中..."</span>
        </div>
    }
}

/// Inline spinner for buttons
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
