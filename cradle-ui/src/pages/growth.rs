//! Growth Page

use leptos::*;

use cradle::metrics;
use cradle::pages::growth::FEVER_THRESHOLD_CELSIUS;
use cradle::pages::{growth, GrowthMetric, GrowthView, TemperatureSummary};
use cradle::shell::Route;

use super::PageTitle;
use crate::components::{LineChart, NoData, Section, SummaryCards};
use crate::state::use_page_state;

fn metric_chart(metric: Option<GrowthMetric>, color: &'static str, format: fn(f64) -> String) -> View {
    match metric {
        Some(m) => view! { <LineChart points=m.series color=color format=format /> }.into_view(),
        None => view! { <NoData /> }.into_view(),
    }
}

/// Daily peak temperature with the fever line, then the fever days
fn temperature_chart(temperature: Option<TemperatureSummary>) -> View {
    let Some(t) = temperature else {
        return view! { <NoData /> }.into_view();
    };
    view! {
        <LineChart
            points=t.series
            color="#f97316"
            reference=FEVER_THRESHOLD_CELSIUS
            format=metrics::format_celsius
        />
        {(!t.fever_days.is_empty()).then(|| view! {
            <ul class="mt-4 flex flex-wrap gap-2">
                {t.fever_days.into_iter().map(|day| view! {
                    <li class="px-2 py-1 bg-orange-50 border border-orange-200 text-orange-800 rounded text-sm">{day}</li>
                }).collect_view()}
            </ul>
        })}
    }
    .into_view()
}

#[component]
pub fn GrowthPage() -> impl IntoView {
    let page = use_page_state(|api| async move { growth::load(&*api).await });

    view! {
        <div class="space-y-8">
            <PageTitle title=Route::Growth.title() subtitle="体重・身長の推移と体温" />
            {page.render(|v: GrowthView| view! {
                <div class="space-y-8">
                    <SummaryCards cards=v.cards />
                    <div class="grid lg:grid-cols-2 gap-8">
                        <Section title="体重 (kg)">
                            {metric_chart(v.weight, "#22c55e", metrics::format_kg)}
                        </Section>
                        <Section title="身長 (cm)">
                            {metric_chart(v.height, "#0ea5e9", metrics::format_cm)}
                        </Section>
                    </div>
                    <Section
                        title="体温 (℃)"
                        description=format!("日ごとの最高体温。{} ℃ 以上を発熱とみなします", FEVER_THRESHOLD_CELSIUS)
                    >
                        {temperature_chart(v.temperature)}
                    </Section>
                </div>
            })}
        </div>
    }
}
