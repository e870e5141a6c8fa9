//! Sleep Page

use leptos::*;

use cradle::pages::{sleep, SleepView};
use cradle::shell::Route;

use super::PageTitle;
use crate::components::{BarChart, HeatMap, Section, SummaryCards};
use crate::state::use_page_state;

#[component]
pub fn SleepPage() -> impl IntoView {
    let page = use_page_state(|api| async move { sleep::load(&*api).await });

    view! {
        <div class="space-y-8">
            <PageTitle title=Route::Sleep.title() subtitle="睡眠時間と入眠・起床の時刻" />
            {page.render(|v: SleepView| view! {
                <div class="space-y-8">
                    <SummaryCards cards=v.cards />
                    <div class="grid lg:grid-cols-2 gap-8">
                        <Section
                            title="入眠時刻の分布"
                            description=format!("最も多い時刻: {}", v.peak_start_hour)
                        >
                            <BarChart buckets=v.start_distribution color="#6366f1" max_labels=8 />
                        </Section>
                        <Section
                            title="起床時刻の分布"
                            description=format!("最も多い時刻: {}", v.peak_wake_hour)
                        >
                            <BarChart buckets=v.wake_distribution color="#0ea5e9" max_labels=8 />
                        </Section>
                    </div>
                    <Section title="時間帯ヒートマップ">
                        <HeatMap rows=v.heat_rows low="#eef2ff" high="#4338ca" />
                    </Section>
                </div>
            })}
        </div>
    }
}
