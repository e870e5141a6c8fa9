//! Summary Card Component
//!
//! Displays one labelled scalar from a page view model.

use leptos::*;

use cradle::pages::SummaryCard as CardData;

/// One labelled value with an optional secondary line
#[component]
pub fn SummaryCard(card: CardData) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg p-4 border border-gray-200 shadow-sm">
            <span class="text-gray-500 text-sm">{card.label}</span>
            <div class="text-2xl font-bold text-gray-900 mt-2">{card.value}</div>
            {card.detail.map(|d| view! {
                <div class="text-xs text-gray-400 mt-1">{d}</div>
            })}
        </div>
    }
}

/// Responsive row of summary cards
#[component]
pub fn SummaryCards(cards: Vec<CardData>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {cards.into_iter().map(|card| view! { <SummaryCard card=card /> }).collect_view()}
        </div>
    }
}
