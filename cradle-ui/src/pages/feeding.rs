//! Feeding Page

use leptos::*;

use cradle::pages::{feeding, FeedingView};
use cradle::shell::Route;

use super::PageTitle;
use crate::components::{BarChart, HeatMap, Section, SummaryCards};
use crate::state::use_page_state;

#[component]
pub fn FeedingPage() -> impl IntoView {
    let page = use_page_state(|api| async move { feeding::load(&*api).await });

    view! {
        <div class="space-y-8">
            <PageTitle title=Route::Feeding.title() subtitle="ミルクと離乳食の量・時刻" />
            {page.render(|v: FeedingView| view! {
                <div class="space-y-8">
                    <SummaryCards cards=v.cards />
                    <div class="grid lg:grid-cols-2 gap-8">
                        <Section
                            title="授乳時刻の分布"
                            description=format!("最も多い時刻: {}", v.peak_milk_hour)
                        >
                            <BarChart buckets=v.milk_distribution max_labels=8 />
                        </Section>
                        <Section title="離乳食の時刻">
                            <BarChart buckets=v.food_distribution color="#22c55e" max_labels=8 />
                        </Section>
                    </div>
                    <Section title="時間帯ヒートマップ">
                        <HeatMap rows=v.heat_rows />
                    </Section>
                </div>
            })}
        </div>
    }
}
