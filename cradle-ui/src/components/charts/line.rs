//! Time-series line chart

use leptos::*;
use web_sys::HtmlCanvasElement;

use cradle::charts::{ChartFrame, TimeSeriesPoint};

use super::{plain, short_date, Formatter, NoData, Plot, CANVAS_HEIGHT, CANVAS_WIDTH, PRIMARY};

/// One line over days; `reference` draws a horizontal marker
#[component]
pub fn LineChart(
    points: Vec<TimeSeriesPoint>,
    #[prop(default = PRIMARY)]
    color: &'static str,
    #[prop(optional)]
    reference: Option<f64>,
    #[prop(default = plain)]
    format: Formatter,
    #[prop(into, optional)]
    y_label: Option<String>,
) -> impl IntoView {
    let frame = ChartFrame::new(points.iter().map(|p| p.value))
        .map(|f| reference.map_or(f, |r| f.including(r)));
    let Some(frame) = frame else {
        return view! { <NoData /> }.into_view();
    };

    let canvas_ref = create_node_ref::<html::Canvas>();
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw(&canvas, &points, &frame, color, reference, format);
        }
    });

    view! {
        <div>
            {y_label.map(|l| view! { <div class="text-xs text-gray-500 mb-1">{l}</div> })}
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

fn draw(
    canvas: &HtmlCanvasElement,
    points: &[TimeSeriesPoint],
    frame: &ChartFrame,
    color: &str,
    reference: Option<f64>,
    format: Formatter,
) {
    let Some(plot) = Plot::new(canvas) else {
        return;
    };
    plot.grid(frame, format);

    if let Some(r) = reference {
        plot.reference_line(frame, r);
    }

    let xy: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                plot.left + ChartFrame::x_px(i, points.len(), plot.width),
                plot.y(frame, p.value),
            )
        })
        .collect();

    plot.ctx.set_stroke_style(&color.into());
    plot.ctx.set_line_width(2.0);
    plot.ctx.begin_path();
    for (i, (x, y)) in xy.iter().enumerate() {
        if i == 0 {
            plot.ctx.move_to(*x, *y);
        } else {
            plot.ctx.line_to(*x, *y);
        }
    }
    plot.ctx.stroke();

    for (x, y) in &xy {
        plot.dot(*x, *y, 3.0, color);
    }

    let labels: Vec<String> = points.iter().map(|p| short_date(&p.date)).collect();
    plot.x_labels(&labels, 8);
}
