//! Chart Primitives
//!
//! Stateless renderers over the chart records built by `cradle::charts`.
//! Line, bar and scatter charts draw on an HTML canvas; the heat-map is a
//! grid of coloured cells. Every chart shows [`NoData`] instead of an
//! empty plot.

mod bar;
mod heat_map;
mod line;
mod scatter;

pub use bar::BarChart;
pub use heat_map::HeatMap;
pub use line::LineChart;
pub use scatter::ScatterChart;

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use cradle::charts::ChartFrame;

/// Canvas backing size; CSS scales it to the container
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 320;

/// Default series colour
pub const PRIMARY: &str = "#FF9800";
const GRID: &str = "#e5e7eb";
const AXIS_TEXT: &str = "#6b7280";
const REFERENCE: &str = "#ef4444";

/// Value formatter for axis labels and tooltips
pub type Formatter = fn(f64) -> String;

pub fn plain(value: f64) -> String {
    format!("{:.1}", value)
}

/// Placeholder for an empty or absent series
#[component]
pub fn NoData() -> impl IntoView {
    view! {
        <div class="h-48 flex items-center justify-center text-gray-400 text-sm bg-gray-50 rounded-lg">
            "データがありません"
        </div>
    }
}

/// Drawable area inside the axis margins
pub(crate) struct Plot {
    pub ctx: CanvasRenderingContext2d,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    canvas_height: f64,
}

impl Plot {
    const MARGIN_LEFT: f64 = 60.0;
    const MARGIN_RIGHT: f64 = 20.0;
    const MARGIN_TOP: f64 = 20.0;
    const MARGIN_BOTTOM: f64 = 40.0;

    /// Clear the canvas and prepare the plot area
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        ctx.clear_rect(0.0, 0.0, width, height);
        ctx.set_font("12px sans-serif");

        Some(Self {
            ctx,
            left: Self::MARGIN_LEFT,
            top: Self::MARGIN_TOP,
            width: width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT,
            height: height - Self::MARGIN_TOP - Self::MARGIN_BOTTOM,
            canvas_height: height,
        })
    }

    pub fn y(&self, frame: &ChartFrame, value: f64) -> f64 {
        self.top + frame.y_px(value, self.height)
    }

    /// Horizontal grid with five value labels
    pub fn grid(&self, frame: &ChartFrame, format: Formatter) {
        self.ctx.set_stroke_style(&GRID.into());
        self.ctx.set_line_width(1.0);
        for i in 0..=5 {
            let value = frame.max - (i as f64 / 5.0) * (frame.max - frame.min);
            let y = self.y(frame, value);
            self.ctx.begin_path();
            self.ctx.move_to(self.left, y);
            self.ctx.line_to(self.left + self.width, y);
            self.ctx.stroke();

            self.ctx.set_fill_style(&AXIS_TEXT.into());
            let _ = self.ctx.fill_text(&format(value), 5.0, y + 4.0);
        }
    }

    /// Up to `max_labels` evenly spaced category labels under the x axis
    pub fn x_labels(&self, labels: &[String], max_labels: usize) {
        if labels.is_empty() {
            return;
        }
        let step = labels.len().div_ceil(max_labels.max(1));
        self.ctx.set_fill_style(&AXIS_TEXT.into());
        for (i, label) in labels.iter().enumerate().step_by(step.max(1)) {
            let x = self.left + ChartFrame::x_px(i, labels.len(), self.width);
            let _ = self.ctx.fill_text(label, x - 15.0, self.canvas_height - 12.0);
        }
    }

    /// Horizontal marker, e.g. an average
    pub fn reference_line(&self, frame: &ChartFrame, value: f64) {
        let y = self.y(frame, value);
        self.ctx.set_stroke_style(&REFERENCE.into());
        self.ctx.set_line_width(1.5);
        self.ctx.begin_path();
        self.ctx.move_to(self.left, y);
        self.ctx.line_to(self.left + self.width, y);
        self.ctx.stroke();
    }

    pub fn dot(&self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style(&color.into());
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0);
        self.ctx.fill();
    }
}

/// Short axis label for a `YYYY-MM-DD` day
pub fn short_date(date: &str) -> String {
    match date.get(5..10) {
        Some(md) if date.len() >= 10 => md.replace('-', "/"),
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-02-01"), "02/01");
        assert_eq!(short_date("3時"), "3時");
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(plain(8.04), "8.0");
    }
}
