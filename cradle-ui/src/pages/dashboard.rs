//! Dashboard Page
//!
//! Averages, daily trends and the vomit overview from the comprehensive
//! analysis.

use leptos::*;

use cradle::metrics;
use cradle::pages::{dashboard, DashboardView};
use cradle::shell::Route;

use super::PageTitle;
use crate::components::{BarChart, CorrelationTable, LineChart, Section, SummaryCards};
use crate::state::use_page_state;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let page = use_page_state(|api| async move { dashboard::load(&*api).await });

    view! {
        <div class="space-y-8">
            <PageTitle title=Route::Dashboard.title() subtitle="記録全体の概要" />
            {page.render(|v: DashboardView| view! {
                <div class="space-y-8">
                    <SummaryCards cards=v.cards />

                    {v.summary_text.map(|text| view! {
                        <p class="bg-white rounded-lg border border-gray-200 p-4 text-gray-700 whitespace-pre-line">{text}</p>
                    })}

                    <div class="grid lg:grid-cols-2 gap-8">
                        <Section title="睡眠時間の推移" description="1日あたりの睡眠時間 (時間)">
                            <LineChart
                                points=v.sleep_series
                                color="#6366f1"
                                reference=v.avg_sleep_hours
                                format=metrics::format_hours
                            />
                        </Section>
                        <Section title="授乳量の推移" description="1日あたりのミルク量 (ml)">
                            <LineChart
                                points=v.milk_series
                                reference=v.avg_milk_ml
                                format=metrics::format_ml
                            />
                        </Section>
                        <Section title="吐き戻し回数の推移">
                            <LineChart points=v.vomit_series color="#ef4444" reference=v.avg_vomit_count />
                        </Section>
                        <Section
                            title="吐き戻しの時間帯"
                            description=format!("最も多い時間帯: {}", v.peak_vomit_hour)
                        >
                            <BarChart buckets=v.vomit_hourly color="#ef4444" max_labels=8 />
                        </Section>
                    </div>

                    {(!v.weight_series.is_empty() || !v.height_series.is_empty()).then(|| view! {
                        <div class="grid lg:grid-cols-2 gap-8">
                            <Section title="体重の推移" description="kg">
                                <LineChart points=v.weight_series color="#22c55e" format=metrics::format_kg />
                            </Section>
                            <Section title="身長の推移" description="cm">
                                <LineChart points=v.height_series color="#0ea5e9" format=metrics::format_cm />
                            </Section>
                        </div>
                    })}

                    <Section title="相関分析">
                        <CorrelationTable rows=v.correlations />
                    </Section>
                </div>
            })}
        </div>
    }
}
