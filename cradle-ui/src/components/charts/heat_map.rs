//! Hour-of-day heat-map

use leptos::*;

use cradle::charts::{HeatRow, HeatScale, Rgb};

use super::NoData;

const DEFAULT_LOW: Rgb = Rgb::new(0xff, 0xf7, 0xed);
const DEFAULT_HIGH: Rgb = Rgb::new(0xea, 0x58, 0x0c);

fn parse_or(hex: &str, fallback: Rgb) -> Rgb {
    Rgb::from_hex(hex).unwrap_or_else(|e| {
        web_sys::console::warn_1(&e.to_string().into());
        fallback
    })
}

/// One row per label, one cell per hour, coloured over the observed range
#[component]
pub fn HeatMap(
    rows: Vec<HeatRow>,
    #[prop(default = "#fff7ed")]
    low: &'static str,
    #[prop(default = "#ea580c")]
    high: &'static str,
) -> impl IntoView {
    if rows.iter().all(|r| r.cells.is_empty()) {
        return view! { <NoData /> }.into_view();
    }

    let scale = HeatScale::new(
        parse_or(low, DEFAULT_LOW),
        parse_or(high, DEFAULT_HIGH),
        rows.iter().flat_map(|r| r.cells.iter().copied()),
    );
    let hours = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);

    view! {
        <div class="overflow-x-auto">
            <table class="text-xs border-separate border-spacing-0.5">
                <thead>
                    <tr>
                        <th />
                        {(0..hours).map(|h| view! {
                            <th class="font-normal text-gray-400 w-6">{h}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().map(|row| view! {
                        <tr>
                            <th class="pr-2 text-right font-normal text-gray-600 whitespace-nowrap">{row.label}</th>
                            {row.cells.iter().enumerate().map(|(h, v)| view! {
                                <td
                                    class="w-6 h-6 rounded-sm"
                                    style=format!("background-color: {}", scale.color(*v))
                                    title=format!("{}時: {}", h, v)
                                />
                            }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}
