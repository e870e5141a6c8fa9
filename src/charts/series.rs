//! Chart Records
//!
//! Normalized records the chart primitives draw, and the functions that
//! build them from backend payloads.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::dto::calendar_day;
use crate::api::{DailySummaryRow, EventRecord, KeyedCounts, LabeledSeries};
use crate::metrics::{finite, or_zero};

/// Buckets in every hourly distribution
pub const HOURS_PER_DAY: usize = 24;

/// Vomit severity scale, levels 1..=4 in order
pub const SEVERITY_LABELS: [&str; 4] = ["極小", "小", "中", "大"];

/// One day's value in a chronological series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: f64,
}

/// One bar of a categorical distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    pub label: String,
    pub count: u64,
}

/// One day plotted as (x, y)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// A labelled row of 24 hourly cells for the heat-map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatRow {
    pub label: String,
    pub cells: Vec<f64>,
}

impl HeatRow {
    pub fn from_buckets(label: impl Into<String>, buckets: &[DistributionBucket]) -> Self {
        Self {
            label: label.into(),
            cells: buckets.iter().map(|b| b.count as f64).collect(),
        }
    }
}

/// Pair dates with values into a chronological, one-point-per-day series.
///
/// Nulls become 0, `scale` converts units, extra entries on the longer side
/// are ignored, and a repeated day keeps its last value.
pub fn zip_series(
    dates: &[String],
    values: &[Option<f64>],
    scale: impl Fn(f64) -> f64,
) -> Vec<TimeSeriesPoint> {
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
    for (date, value) in dates.iter().zip(values) {
        let key = calendar_day(date);
        if key.is_empty() {
            continue;
        }
        by_day.insert(key, finite(scale(or_zero(*value))));
    }
    by_day
        .into_iter()
        .map(|(date, value)| TimeSeriesPoint { date, value })
        .collect()
}

/// Series from a backend-prepared `{labels, data}` block
pub fn labeled_points(series: &LabeledSeries, scale: impl Fn(f64) -> f64) -> Vec<TimeSeriesPoint> {
    zip_series(&series.labels, &series.data, scale)
}

/// Parse an hour bucket key: `"7"`, `"7.0"`, `"07"` or `"7時"`
fn hour_of(key: &str) -> Option<usize> {
    let digits: String = key
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let hour = digits.parse::<f64>().ok()?;
    if hour.fract() != 0.0 || !(0.0..HOURS_PER_DAY as f64).contains(&hour) {
        return None;
    }
    Some(hour as usize)
}

fn count_of(value: Option<f64>) -> u64 {
    or_zero(value).max(0.0).round() as u64
}

fn empty_hours() -> Vec<DistributionBucket> {
    (0..HOURS_PER_DAY)
        .map(|h| DistributionBucket {
            label: format!("{}時", h),
            count: 0,
        })
        .collect()
}

/// Materialize all 24 hourly buckets from a sparse `{hour: count}` map.
///
/// Unparseable or out-of-range keys are skipped.
pub fn hourly_distribution(counts: &KeyedCounts) -> Vec<DistributionBucket> {
    let mut buckets = empty_hours();
    for (key, value) in counts {
        match hour_of(key) {
            Some(h) => buckets[h].count += count_of(*value),
            None => tracing::debug!(key = %key, "Skipping non-hour bucket"),
        }
    }
    buckets
}

/// Same as [`hourly_distribution`] for a `{labels, data}` series
pub fn hourly_from_values(series: &LabeledSeries) -> Vec<DistributionBucket> {
    let mut buckets = empty_hours();
    for (label, value) in series.labels.iter().zip(&series.data) {
        if let Some(h) = hour_of(label) {
            buckets[h].count += count_of(*value);
        }
    }
    buckets
}

fn severity_level(event: &EventRecord) -> Option<usize> {
    if let Some(v) = event.value.filter(|v| v.is_finite()) {
        let level = v.round() as i64;
        return (1..=4).contains(&level).then_some(level as usize);
    }
    // no numeric level; fall back to the label text ("吐く 中")
    let text = [event.kind.as_deref(), event.detail.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if text.contains("極小") {
        return Some(1);
    }
    ["小", "中", "大"]
        .iter()
        .position(|l| text.contains(l))
        .map(|i| i + 2)
}

/// Count vomit events per severity level, always four buckets
pub fn severity_distribution(events: &[EventRecord]) -> Vec<DistributionBucket> {
    let mut buckets: Vec<DistributionBucket> = SEVERITY_LABELS
        .iter()
        .map(|l| DistributionBucket {
            label: l.to_string(),
            count: 0,
        })
        .collect();
    for level in events.iter().filter_map(severity_level) {
        buckets[level - 1].count += 1;
    }
    buckets
}

/// One scatter point per day from the daily summary rows
pub fn correlation_points(
    rows: &[DailySummaryRow],
    x: impl Fn(&DailySummaryRow) -> f64,
    y: impl Fn(&DailySummaryRow) -> f64,
) -> Vec<CorrelationPoint> {
    let mut by_day: BTreeMap<String, CorrelationPoint> = BTreeMap::new();
    for row in rows {
        let key = calendar_day(&row.date);
        if key.is_empty() {
            continue;
        }
        let point = CorrelationPoint {
            x: finite(x(row)),
            y: finite(y(row)),
            label: key.clone(),
        };
        by_day.insert(key, point);
    }
    by_day.into_values().collect()
}

/// Value domain of a chart, with 10% headroom on both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub min: f64,
    pub max: f64,
}

impl ChartFrame {
    /// `None` when there is nothing to draw
    pub fn new(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() {
            return None;
        }

        let range = max - min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        Some(Self {
            min: min - padding,
            max: max + padding,
        })
    }

    /// Like [`ChartFrame::new`], but the floor sits at 0 when no value is negative (bars, counts)
    pub fn from_zero(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let frame = Self::new(values.iter().copied())?;
        if values.iter().all(|v| *v >= 0.0) {
            Some(Self { min: 0.0, ..frame })
        } else {
            Some(frame)
        }
    }

    /// Widen the domain so a reference line stays visible
    pub fn including(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Map a value to a pixel offset from the top of a `height`-tall area
    pub fn y_px(&self, value: f64, height: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return height / 2.0;
        }
        height - (finite(value) - self.min) / span * height
    }

    /// Centre of slot `index` when `count` slots share `width`
    pub fn x_px(index: usize, count: usize, width: f64) -> f64 {
        if count <= 1 {
            return width / 2.0;
        }
        index as f64 / (count - 1) as f64 * width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(ds: &[&str]) -> Vec<String> {
        ds.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_zip_series_nulls_and_order() {
        let points = zip_series(
            &dates(&["2024-02-02", "2024-02-01T00:00:00", "2024-02-03"]),
            &[Some(120.0), None, Some(f64::NAN)],
            |m| m / 60.0,
        );
        assert_eq!(
            points,
            vec![
                TimeSeriesPoint { date: "2024-02-01".into(), value: 0.0 },
                TimeSeriesPoint { date: "2024-02-02".into(), value: 2.0 },
                TimeSeriesPoint { date: "2024-02-03".into(), value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_zip_series_unique_days() {
        let points = zip_series(
            &dates(&["2024-02-01", "2024-02-01"]),
            &[Some(1.0), Some(2.0)],
            |v| v,
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 2.0);
    }

    #[test]
    fn test_hourly_distribution_fills_missing_hours() {
        let mut counts = KeyedCounts::new();
        counts.insert("7".into(), Some(3.0));
        counts.insert("23.0".into(), Some(1.0));
        counts.insert("24".into(), Some(9.0));
        counts.insert("5".into(), None);

        let dist = hourly_distribution(&counts);
        assert_eq!(dist.len(), HOURS_PER_DAY);
        assert_eq!(dist[7].count, 3);
        assert_eq!(dist[23].count, 1);
        assert_eq!(dist[5].count, 0);
        assert_eq!(dist[0].label, "0時");
        assert_eq!(dist.iter().map(|b| b.count).sum::<u64>(), 4);
    }

    #[test]
    fn test_hourly_from_labeled_series() {
        let series = LabeledSeries {
            labels: vec!["6時".into(), "18時".into()],
            data: vec![Some(2.0), Some(1.0)],
            unit: Some("回".into()),
        };
        let dist = hourly_from_values(&series);
        assert_eq!(dist[6].count, 2);
        assert_eq!(dist[18].count, 1);
    }

    #[test]
    fn test_severity_distribution() {
        let events = vec![
            EventRecord { value: Some(1.0), ..Default::default() },
            EventRecord { value: Some(4.0), ..Default::default() },
            EventRecord { value: Some(4.0), ..Default::default() },
            EventRecord { value: Some(9.0), ..Default::default() },
            EventRecord { kind: Some("吐く 極小".into()), ..Default::default() },
            EventRecord { kind: Some("吐く 中".into()), ..Default::default() },
        ];
        let counts: Vec<u64> = severity_distribution(&events).iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 0, 1, 2]);
        assert_eq!(severity_distribution(&[]).len(), 4);
    }

    #[test]
    fn test_correlation_points_one_per_day() {
        let rows = vec![
            DailySummaryRow { date: "2024-02-01".into(), milk_amount: 600.0, vomit_count: 2.0, ..Default::default() },
            DailySummaryRow { date: "2024-02-02".into(), milk_amount: 700.0, vomit_count: 0.0, ..Default::default() },
        ];
        let points = correlation_points(&rows, |r| r.milk_amount, |r| r.vomit_count);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "2024-02-01");
        assert_eq!(points[1].x, 700.0);
    }

    #[test]
    fn test_chart_frame_padding() {
        let frame = ChartFrame::new([0.0, 10.0]).unwrap();
        assert_eq!(frame.min, -1.0);
        assert_eq!(frame.max, 11.0);
        assert_eq!(ChartFrame::from_zero([0.0, 10.0]).unwrap().min, 0.0);

        let flat = ChartFrame::new([5.0, 5.0]).unwrap();
        assert_eq!((flat.min, flat.max), (4.0, 6.0));

        assert!(ChartFrame::new(Vec::new()).is_none());
        assert!(ChartFrame::new([f64::NAN]).is_none());
    }

    #[test]
    fn test_chart_frame_from_zero_positive_counts() {
        let frame = ChartFrame::from_zero([3.0, 5.0, 4.0, 6.0]).unwrap();
        assert_eq!(frame.min, 0.0);
        assert!((frame.max - 6.3).abs() < 1e-9);
        // bar heights stay proportional to the counts
        let h = |v: f64| 100.0 - frame.y_px(v, 100.0);
        assert!((h(6.0) / h(3.0) - 2.0).abs() < 1e-9);

        let mixed = ChartFrame::from_zero([-5.0, 10.0]).unwrap();
        assert_eq!(mixed.min, -6.5);

        assert!(ChartFrame::from_zero([f64::NAN]).is_none());
    }

    #[test]
    fn test_chart_frame_pixels() {
        let frame = ChartFrame { min: 0.0, max: 10.0 };
        assert_eq!(frame.y_px(10.0, 200.0), 0.0);
        assert_eq!(frame.y_px(0.0, 200.0), 200.0);
        assert_eq!(ChartFrame::x_px(0, 1, 100.0), 50.0);
        assert_eq!(ChartFrame::x_px(2, 3, 100.0), 100.0);
        assert_eq!(frame.including(15.0).max, 15.0);
    }
}
