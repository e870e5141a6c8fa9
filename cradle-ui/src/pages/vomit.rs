//! Vomit Page
//!
//! Correlations with feeding and sleep, when it happens, and how bad it is.

use leptos::*;

use cradle::pages::vomit::{self, FollowUpRow};
use cradle::pages::VomitView;
use cradle::shell::Route;

use super::PageTitle;
use crate::components::{
    BarChart, CorrelationTable, LineChart, NoData, ScatterChart, Section, SummaryCards,
};
use crate::state::use_page_state;

const VOMIT_COLOR: &str = "#ef4444";

#[component]
fn FollowUpTable(rows: Vec<FollowUpRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <NoData /> }.into_view();
    }

    view! {
        <table class="w-full text-sm">
            <thead class="text-gray-500 border-b border-gray-200">
                <tr>
                    <th class="text-left py-2">"授乳後"</th>
                    <th class="text-right py-2">"該当回数"</th>
                    <th class="text-right py-2">"割合"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| view! {
                    <tr class="border-b border-gray-100">
                        <td class="py-2">{format!("{}分以内", row.window_minutes)}</td>
                        <td class="py-2 text-right">{format!("{:.0}", row.feeds)}</td>
                        <td class="py-2 text-right">{format!("{:.1}%", row.rate_percent)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
pub fn VomitPage() -> impl IntoView {
    let page = use_page_state(|api| async move { vomit::load(&*api).await });

    view! {
        <div class="space-y-8">
            <PageTitle title=Route::Vomit.title() subtitle="授乳・睡眠との関係と発生パターン" />
            {page.render(|v: VomitView| view! {
                <div class="space-y-8">
                    {v.secondary_unavailable.then(|| view! {
                        <p class="bg-amber-50 border border-amber-200 text-amber-800 rounded-lg p-3 text-sm">
                            "日次データまたはイベント一覧を取得できなかったため、一部のグラフは表示されません。"
                        </p>
                    })}
                    <SummaryCards cards=v.cards />
                    <Section title="相関分析">
                        <CorrelationTable rows=v.correlations />
                    </Section>
                    <div class="grid lg:grid-cols-2 gap-8">
                        <Section
                            title="吐き戻しの時間帯"
                            description=format!("最も多い時間帯: {}", v.peak_hour)
                        >
                            <BarChart buckets=v.hourly color=VOMIT_COLOR max_labels=8 />
                        </Section>
                        <Section title="授乳後の吐き戻し">
                            <FollowUpTable rows=v.follow_up />
                        </Section>
                        <Section title="吐き戻し回数の推移">
                            <LineChart points=v.daily_series color=VOMIT_COLOR />
                        </Section>
                        <Section title="ミルク量と吐き戻し回数">
                            <ScatterChart
                                points=v.scatter
                                x_label="ミルク量 (ml)"
                                y_label="吐き戻し回数"
                                color=VOMIT_COLOR
                            />
                        </Section>
                    </div>
                    <Section title="吐き戻しの程度">
                        <BarChart buckets=v.severity color=VOMIT_COLOR />
                    </Section>
                </div>
            })}
        </div>
    }
}
