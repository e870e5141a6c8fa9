//! Correlation Table

use leptos::*;

use cradle::pages::CorrelationRow;

use super::charts::NoData;

/// Coefficient table with significance markers
#[component]
pub fn CorrelationTable(rows: Vec<CorrelationRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <NoData /> }.into_view();
    }

    view! {
        <table class="w-full text-sm">
            <thead class="text-gray-500 border-b border-gray-200">
                <tr>
                    <th class="text-left py-2">"項目"</th>
                    <th class="text-right py-2">"相関係数"</th>
                    <th class="text-right py-2">"p値"</th>
                    <th class="text-left py-2 pl-4">"強さ"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| view! {
                    <tr class="border-b border-gray-100">
                        <td class="py-2">{row.label}</td>
                        <td class="py-2 text-right font-mono">{format!("{:+.2}", row.coefficient)}</td>
                        <td class="py-2 text-right font-mono">
                            {format!("{:.3}", row.p_value)}
                            {row.significant.then(|| view! { <span class="text-primary-600 ml-1">"*"</span> })}
                        </td>
                        <td class="py-2 pl-4 text-gray-600">{row.strength}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
        <p class="text-xs text-gray-400 mt-2">"* p < 0.05"</p>
    }
    .into_view()
}
