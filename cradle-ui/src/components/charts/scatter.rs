//! Scatter plot of daily (x, y) pairs

use leptos::*;
use web_sys::HtmlCanvasElement;

use cradle::charts::{ChartFrame, CorrelationPoint};

use super::{plain, NoData, Plot, CANVAS_HEIGHT, CANVAS_WIDTH, PRIMARY};

#[component]
pub fn ScatterChart(
    points: Vec<CorrelationPoint>,
    #[prop(into)]
    x_label: String,
    #[prop(into)]
    y_label: String,
    #[prop(default = PRIMARY)]
    color: &'static str,
) -> impl IntoView {
    let frames = ChartFrame::new(points.iter().map(|p| p.x))
        .zip(ChartFrame::new(points.iter().map(|p| p.y)));
    let Some((x_frame, y_frame)) = frames else {
        return view! { <NoData /> }.into_view();
    };

    let canvas_ref = create_node_ref::<html::Canvas>();
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw(&canvas, &points, &x_frame, &y_frame, color);
        }
    });

    view! {
        <div>
            <div class="text-xs text-gray-500 mb-1">{format!("縦軸: {} / 横軸: {}", y_label, x_label)}</div>
            <canvas
                node_ref=canvas_ref
                width=CANVAS_WIDTH.to_string()
                height=CANVAS_HEIGHT.to_string()
                class="w-full h-64 rounded-lg"
            />
        </div>
    }
    .into_view()
}

fn x_px(frame: &ChartFrame, value: f64, width: f64) -> f64 {
    let span = frame.max - frame.min;
    if span <= 0.0 {
        return width / 2.0;
    }
    (value - frame.min) / span * width
}

fn draw(
    canvas: &HtmlCanvasElement,
    points: &[CorrelationPoint],
    x_frame: &ChartFrame,
    y_frame: &ChartFrame,
    color: &str,
) {
    let Some(plot) = Plot::new(canvas) else {
        return;
    };
    plot.grid(y_frame, plain);

    for p in points {
        plot.dot(
            plot.left + x_px(x_frame, p.x, plot.width),
            plot.y(y_frame, p.y),
            4.0,
            color,
        );
    }

    let ticks: Vec<String> = (0..=4)
        .map(|i| plain(x_frame.min + (x_frame.max - x_frame.min) * i as f64 / 4.0))
        .collect();
    plot.x_labels(&ticks, ticks.len());
}
