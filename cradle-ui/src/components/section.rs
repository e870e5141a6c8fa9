//! Section Container

use leptos::*;

/// Titled card wrapping one block of a page
#[component]
pub fn Section(
    #[prop(into)]
    title: String,
    #[prop(into, optional)]
    description: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <section class="bg-white rounded-xl shadow-sm border border-gray-200 p-6">
            <h2 class="text-lg font-semibold text-gray-800">{title}</h2>
            {description.map(|d| view! { <p class="text-sm text-gray-500 mt-1">{d}</p> })}
            <div class="mt-4">{children()}</div>
        </section>
    }
}
