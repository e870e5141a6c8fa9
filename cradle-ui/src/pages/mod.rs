//! Pages
//!
//! One component per route. Each mounts, fetches through its loader from
//! `cradle::pages`, and renders the resulting view state.

mod dashboard;
mod feeding;
mod growth;
mod not_found;
mod sleep;
mod upload;
mod vomit;

pub use dashboard::DashboardPage;
pub use feeding::FeedingPage;
pub use growth::GrowthPage;
pub use not_found::NotFound;
pub use sleep::SleepPage;
pub use upload::UploadPage;
pub use vomit::VomitPage;

use leptos::*;

/// Page heading
#[component]
fn PageTitle(
    #[prop(into)]
    title: String,
    #[prop(into)]
    subtitle: String,
) -> impl IntoView {
    view! {
        <div>
            <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
            <p class="text-gray-500 mt-1">{subtitle}</p>
        </div>
    }
}
