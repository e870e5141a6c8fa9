//! Bar chart over categorical buckets

use leptos::*;
use web_sys::HtmlCanvasElement;

use cradle::charts::{ChartFrame, DistributionBucket};

use super::{NoData, Plot, CANVAS_HEIGHT, CANVAS_WIDTH, PRIMARY};

fn count_label(value: f64) -> String {
    format!("{:.0}", value)
}

#[component]
pub fn BarChart(
    buckets: Vec<DistributionBucket>,
    #[prop(default = PRIMARY)]
    color: &'static str,
    /// Max x-axis labels; hourly charts show every third hour
    #[prop(default = 12)]
    max_labels: usize,
) -> impl IntoView {
    let Some(frame) = ChartFrame::from_zero(buckets.iter().map(|b| b.count as f64)) else {
        return view! { <NoData /> }.into_view();
    };

    let canvas_ref = create_node_ref::<html::Canvas>();
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw(&canvas, &buckets, &frame, color, max_labels);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width=CANVAS_WIDTH.to_string()
            height=CANVAS_HEIGHT.to_string()
            class="w-full h-64 rounded-lg"
        />
    }
    .into_view()
}

fn draw(
    canvas: &HtmlCanvasElement,
    buckets: &[DistributionBucket],
    frame: &ChartFrame,
    color: &str,
    max_labels: usize,
) {
    let Some(plot) = Plot::new(canvas) else {
        return;
    };
    plot.grid(frame, count_label);

    let slot = plot.width / buckets.len() as f64;
    let base = plot.y(frame, frame.min.max(0.0));
    plot.ctx.set_fill_style(&color.into());
    for (i, bucket) in buckets.iter().enumerate() {
        let top = plot.y(frame, bucket.count as f64);
        plot.ctx.fill_rect(
            plot.left + i as f64 * slot + slot * 0.15,
            top,
            slot * 0.7,
            base - top,
        );
    }

    let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
    plot.x_labels(&labels, max_labels);
}
