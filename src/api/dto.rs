//! Wire Types
//!
//! Request and response bodies exchanged with the analysis backend.
//!
//! The backend serializes pandas frames, so any numeric field may be missing
//! or `null`. Every numeric field here deserializes through [`null_default`],
//! which turns both cases into `0` (or the type's default) before anything
//! downstream does arithmetic on it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::error::ClientError;

/// Status value the backend uses for successful envelopes
pub const STATUS_SUCCESS: &str = "success";

/// Status value returned by the liveness endpoint
pub const STATUS_OK: &str = "ok";

/// Deserialize `null` as the type's default value.
///
/// Combine with `#[serde(default)]` so absent fields get the same treatment.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reduce a backend date to its `YYYY-MM-DD` day key.
///
/// Handles ISO dates and datetimes as well as the RFC 1123 form Flask uses
/// for timestamps (`Thu, 01 Feb 2024 00:00:00 GMT`). Anything else is
/// returned trimmed.
pub fn calendar_day(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    let head = raw
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or_default();
    match chrono::NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(day) => day.format("%Y-%m-%d").to_string(),
        Err(_) => head.to_string(),
    }
}

// ============ Envelope ============

/// `{status, data, message}` wrapper used by every JSON endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Envelope<T> {
    /// Build a successful envelope (used by test doubles and fixtures)
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: Some(data),
            message: None,
            count: None,
        }
    }

    /// Build an application-level failure envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Unwrap the payload, turning a non-success status into an error.
    ///
    /// A successful envelope without `data` yields `Ok(None)`; callers decide
    /// whether that means "empty".
    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ClientError::Application {
                message: self.message.filter(|m| !m.trim().is_empty()),
            })
        }
    }
}

// ============ Requests ============

/// Body for `POST /parse` and `POST /process`.
///
/// Omitting `file_path` makes the backend fall back to its default log file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Filters for `GET /events`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl EventFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(c) = self.category.as_deref() {
            pairs.push(("category", c));
        }
        if let Some(s) = self.start_date.as_deref() {
            pairs.push(("start_date", s));
        }
        if let Some(e) = self.end_date.as_deref() {
            pairs.push(("end_date", e));
        }
        pairs
    }
}

/// Date window for `GET /summary/daily`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(s) = self.start_date.as_deref() {
            pairs.push(("start_date", s));
        }
        if let Some(e) = self.end_date.as_deref() {
            pairs.push(("end_date", e));
        }
        pairs
    }
}

/// Filter for `GET /growth` (`weight`, `height` or `temperature`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthFilter {
    pub kind: Option<String>,
}

impl GrowthFilter {
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.kind
            .as_deref()
            .map(|k| vec![("type", k)])
            .unwrap_or_default()
    }
}

// ============ Responses ============

/// `GET /health` body (not enveloped)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_SUCCESS
    }
}

/// Counts returned by `POST /parse`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ParseSummary {
    #[serde(default, deserialize_with = "null_default")]
    pub events_count: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub days_count: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub growth_records: u64,
}

/// `POST /process` payload: parse counts plus the fresh analysis
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProcessSummary {
    #[serde(flatten)]
    pub counts: ParseSummary,
    #[serde(default)]
    pub analysis: Option<ComprehensiveAnalysis>,
}

/// `{mean, min, max, std}` block for one metric.
///
/// Also accepts pandas `describe()` output; the quartile keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct SummaryStats {
    #[serde(default, deserialize_with = "null_default")]
    pub mean: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub min: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub max: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub std: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub count: f64,
}

/// Per-hour (or per-key) counts, keyed by the stringified bucket
pub type KeyedCounts = BTreeMap<String, Option<f64>>;

/// `{labels, data, unit}` series as prepared by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LabeledSeries {
    #[serde(default, deserialize_with = "null_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub data: Vec<Option<f64>>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl LabeledSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.data.is_empty()
    }
}

/// Column-oriented daily aggregates (`time_series.daily`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DailySeries {
    #[serde(default, deserialize_with = "null_default")]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub sleep_minutes: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub milk_amount: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub milk_count: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub pee_count: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub poop_count: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub vomit_count: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_default")]
    pub vomit_level_sum: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TimeSeriesSet {
    #[serde(default)]
    pub daily: Option<DailySeries>,
    #[serde(default)]
    pub sleep: Option<LabeledSeries>,
    #[serde(default)]
    pub milk: Option<LabeledSeries>,
    #[serde(default)]
    pub vomit: Option<LabeledSeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HourlyPatterns {
    #[serde(default)]
    pub vomit: Option<LabeledSeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub stats: BTreeMap<String, SummaryStats>,
}

/// One entry of the comprehensive correlation list
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CorrelationItem {
    #[serde(default, deserialize_with = "null_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_default")]
    pub value: f64,
    #[serde(default)]
    pub p_value: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub significant: bool,
    #[serde(default)]
    pub strength: Option<String>,
}

/// Prepared weight (kg) and height (cm) series of the comprehensive analysis
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GrowthSeriesSet {
    #[serde(default)]
    pub weight: Option<LabeledSeries>,
    #[serde(default)]
    pub height: Option<LabeledSeries>,
}

/// `GET /analysis/comprehensive` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ComprehensiveAnalysis {
    #[serde(default, deserialize_with = "null_default")]
    pub summary: AnalysisSummary,
    #[serde(default, deserialize_with = "null_default")]
    pub time_series: TimeSeriesSet,
    #[serde(default, deserialize_with = "null_default")]
    pub hourly_patterns: HourlyPatterns,
    #[serde(default, deserialize_with = "null_default")]
    pub correlations: Vec<CorrelationItem>,
    #[serde(default, deserialize_with = "null_default")]
    pub growth: GrowthSeriesSet,
    /// Older backends put the stats block here instead of `summary.stats`
    #[serde(default, deserialize_with = "null_default")]
    pub daily_stats: BTreeMap<String, SummaryStats>,
    #[serde(default)]
    pub vomit_correlation: Option<VomitCorrelation>,
}

impl ComprehensiveAnalysis {
    /// Stats for one metric, from whichever block carries it
    pub fn stat(&self, metric: &str) -> Option<&SummaryStats> {
        self.summary
            .stats
            .get(metric)
            .or_else(|| self.daily_stats.get(metric))
    }

    pub fn has_stats(&self) -> bool {
        !self.summary.stats.is_empty() || !self.daily_stats.is_empty()
    }
}

/// `GET /analysis/sleep-patterns` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SleepPatterns {
    #[serde(default)]
    pub daily_sleep_minutes: Option<SummaryStats>,
    #[serde(default)]
    pub daily_sleep_hours: Option<SummaryStats>,
    #[serde(default, deserialize_with = "null_default")]
    pub sleep_start_distribution: KeyedCounts,
    #[serde(default, deserialize_with = "null_default")]
    pub wake_time_distribution: KeyedCounts,
    #[serde(default)]
    pub sleep_duration_minutes: Option<SummaryStats>,
    #[serde(default)]
    pub sleep_fragmentation: Option<SummaryStats>,
}

impl SleepPatterns {
    /// True when the backend had nothing to analyze (it answers `{}`)
    pub fn is_blank(&self) -> bool {
        self.daily_sleep_minutes.is_none()
            && self.daily_sleep_hours.is_none()
            && self.sleep_duration_minutes.is_none()
            && self.sleep_fragmentation.is_none()
            && self.sleep_start_distribution.is_empty()
            && self.wake_time_distribution.is_empty()
    }
}

/// `GET /analysis/feeding-patterns` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FeedingPatterns {
    #[serde(default)]
    pub daily_milk_amount: Option<SummaryStats>,
    #[serde(default)]
    pub daily_milk_count: Option<SummaryStats>,
    #[serde(default, deserialize_with = "null_default")]
    pub milk_time_distribution: KeyedCounts,
    #[serde(default)]
    pub milk_amount_distribution: Option<SummaryStats>,
    #[serde(default, deserialize_with = "null_default")]
    pub food_time_distribution: KeyedCounts,
    #[serde(default)]
    pub milk_interval_minutes: Option<SummaryStats>,
}

impl FeedingPatterns {
    pub fn is_blank(&self) -> bool {
        self.daily_milk_amount.is_none()
            && self.daily_milk_count.is_none()
            && self.milk_amount_distribution.is_none()
            && self.milk_interval_minutes.is_none()
            && self.milk_time_distribution.is_empty()
            && self.food_time_distribution.is_empty()
    }
}

/// Pearson coefficient with its p-value
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct CorrelationStat {
    #[serde(default, deserialize_with = "null_default")]
    pub correlation: f64,
    #[serde(default)]
    pub p_value: Option<f64>,
}

impl CorrelationStat {
    /// Missing p-values count as "not significant"
    pub fn p_value(&self) -> f64 {
        self.p_value.filter(|p| p.is_finite()).unwrap_or(1.0)
    }
}

/// How often a milk feed was followed by vomiting within a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct FollowUpRates {
    #[serde(rename = "30", default, deserialize_with = "null_default")]
    pub within_30min: f64,
    #[serde(rename = "60", default, deserialize_with = "null_default")]
    pub within_60min: f64,
    #[serde(rename = "120", default, deserialize_with = "null_default")]
    pub within_120min: f64,
    #[serde(rename = "30min_rate", default, deserialize_with = "null_default")]
    pub rate_30min: f64,
    #[serde(rename = "60min_rate", default, deserialize_with = "null_default")]
    pub rate_60min: f64,
    #[serde(rename = "120min_rate", default, deserialize_with = "null_default")]
    pub rate_120min: f64,
}

/// `GET /analysis/vomit-correlation` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VomitCorrelation {
    #[serde(default)]
    pub milk_amount_vomit_count: Option<CorrelationStat>,
    #[serde(default)]
    pub sleep_minutes_vomit_count: Option<CorrelationStat>,
    #[serde(default)]
    pub milk_amount_lag1_vomit_count: Option<CorrelationStat>,
    #[serde(default)]
    pub milk_count_vomit_count: Option<CorrelationStat>,
    #[serde(default)]
    pub pee_count_vomit_count: Option<CorrelationStat>,
    #[serde(default)]
    pub poop_count_vomit_count: Option<CorrelationStat>,
    #[serde(default, deserialize_with = "null_default")]
    pub vomit_hour_distribution: KeyedCounts,
    #[serde(default)]
    pub milk_followed_by_vomit: Option<FollowUpRates>,
}

impl VomitCorrelation {
    pub fn is_blank(&self) -> bool {
        self.milk_amount_vomit_count.is_none()
            && self.sleep_minutes_vomit_count.is_none()
            && self.milk_amount_lag1_vomit_count.is_none()
            && self.milk_count_vomit_count.is_none()
            && self.pee_count_vomit_count.is_none()
            && self.poop_count_vomit_count.is_none()
            && self.vomit_hour_distribution.is_empty()
            && self.milk_followed_by_vomit.is_none()
    }
}

/// One row of `GET /summary/daily`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DailySummaryRow {
    #[serde(default, deserialize_with = "null_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_default")]
    pub sleep_minutes: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub milk_amount: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub milk_count: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub pee_count: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub poop_count: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub vomit_count: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub vomit_level_sum: f64,
}

/// One row of `GET /events`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A single weight, height or body-temperature measurement
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GrowthRecord {
    #[serde(default, deserialize_with = "null_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_default")]
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Row shape the backend emits when it returns the raw growth table
#[derive(Debug, Clone, Default, Deserialize)]
struct GrowthRow {
    #[serde(default, deserialize_with = "null_default")]
    date: String,
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_default")]
    value: f64,
    #[serde(default)]
    unit: Option<String>,
}

/// `GET /growth` payload: weight, height and temperature series plus optional stats
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrowthData {
    pub weight_records: Vec<GrowthRecord>,
    pub height_records: Vec<GrowthRecord>,
    pub temperature_records: Vec<GrowthRecord>,
    pub stats: BTreeMap<String, SummaryStats>,
}

#[derive(Deserialize)]
struct SplitGrowth {
    #[serde(default, deserialize_with = "null_default")]
    weight_records: Vec<GrowthRecord>,
    #[serde(default, deserialize_with = "null_default")]
    height_records: Vec<GrowthRecord>,
    #[serde(default, deserialize_with = "null_default")]
    temperature_records: Vec<GrowthRecord>,
    #[serde(default, deserialize_with = "null_default")]
    stats: BTreeMap<String, SummaryStats>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GrowthShape {
    Split(SplitGrowth),
    Rows(Vec<GrowthRow>),
}

impl<'de> Deserialize<'de> for GrowthData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match GrowthShape::deserialize(deserializer)? {
            GrowthShape::Split(s) => GrowthData {
                weight_records: s.weight_records,
                height_records: s.height_records,
                temperature_records: s.temperature_records,
                stats: s.stats,
            },
            GrowthShape::Rows(rows) => GrowthData::from_rows(rows),
        })
    }
}

impl GrowthData {
    fn from_rows(rows: Vec<GrowthRow>) -> Self {
        let mut data = GrowthData::default();
        for row in rows {
            let record = GrowthRecord {
                date: calendar_day(&row.date),
                value: row.value,
                unit: row.unit,
            };
            match row.kind.as_str() {
                "weight" => data.weight_records.push(record),
                "height" => data.height_records.push(record),
                "temperature" => data.temperature_records.push(record),
                _ => {}
            }
        }
        data
    }

    pub fn is_blank(&self) -> bool {
        self.weight_records.is_empty()
            && self.height_records.is_empty()
            && self.temperature_records.is_empty()
    }
}
