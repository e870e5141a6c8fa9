//! Vomit page: correlations with feeding and sleep
//!
//! The correlation payload is required. The daily summary and the vomit
//! event list are fetched afterwards, one at a time, and only feed the
//! auxiliary charts: if either fails the page still renders with that
//! chart empty and [`VomitView::secondary_unavailable`] set.

use serde::Serialize;

use super::SummaryCard;
use crate::api::{
    CareApi, ClientError, CorrelationItem, CorrelationStat, DailySummaryRow, DateRange,
    EventFilter, EventRecord, VomitCorrelation,
};
use crate::charts::{
    correlation_points, hourly_distribution, severity_distribution, CorrelationPoint,
    DistributionBucket, TimeSeriesPoint,
};
use crate::metrics::{self, Peak};
use crate::view::Loaded;

/// p-values below this are reported as significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// One row of the correlation table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub label: String,
    pub coefficient: f64,
    pub p_value: f64,
    pub significant: bool,
    pub strength: String,
}

impl CorrelationRow {
    fn from_stat(label: &str, stat: &CorrelationStat) -> Self {
        let coefficient = metrics::finite(stat.correlation);
        let p_value = stat.p_value();
        Self {
            label: label.to_string(),
            coefficient,
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
            strength: metrics::correlation_strength(coefficient),
        }
    }
}

impl From<&CorrelationItem> for CorrelationRow {
    fn from(item: &CorrelationItem) -> Self {
        let coefficient = metrics::finite(item.value);
        Self {
            label: item.label.clone(),
            coefficient,
            p_value: item.p_value.filter(|p| p.is_finite()).unwrap_or(1.0),
            significant: item.significant,
            strength: item
                .strength
                .clone()
                .unwrap_or_else(|| metrics::correlation_strength(coefficient)),
        }
    }
}

/// Table rows for every coefficient the backend computed, in a fixed order
pub fn correlation_rows(c: &VomitCorrelation) -> Vec<CorrelationRow> {
    [
        ("ミルク量", &c.milk_amount_vomit_count),
        ("前日のミルク量", &c.milk_amount_lag1_vomit_count),
        ("授乳回数", &c.milk_count_vomit_count),
        ("睡眠時間", &c.sleep_minutes_vomit_count),
        ("おしっこ回数", &c.pee_count_vomit_count),
        ("うんち回数", &c.poop_count_vomit_count),
    ]
    .into_iter()
    .filter_map(|(label, stat)| {
        stat.as_ref()
            .map(|s| CorrelationRow::from_stat(&format!("{}と吐き戻し", label), s))
    })
    .collect()
}

/// Share of milk feeds followed by vomiting within a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUpRow {
    pub window_minutes: u32,
    pub feeds: f64,
    pub rate_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VomitView {
    pub correlations: Vec<CorrelationRow>,
    pub hourly: Vec<DistributionBucket>,
    pub peak_hour: Peak,
    pub follow_up: Vec<FollowUpRow>,
    pub daily_series: Vec<TimeSeriesPoint>,
    /// Milk amount (x) against vomit count (y), one point per day
    pub scatter: Vec<CorrelationPoint>,
    pub severity: Vec<DistributionBucket>,
    pub secondary_unavailable: bool,
    pub cards: Vec<SummaryCard>,
}

impl VomitView {
    /// Build the view; `None` marks a secondary dataset that failed to load
    pub fn from_parts(
        correlation: &VomitCorrelation,
        daily: Option<&[DailySummaryRow]>,
        events: Option<&[EventRecord]>,
    ) -> Loaded<Self> {
        if correlation.is_blank() {
            return Loaded::Empty;
        }

        let correlations = correlation_rows(correlation);
        let hourly = hourly_distribution(&correlation.vomit_hour_distribution);
        let peak_hour = metrics::most_common(&hourly);

        let follow_up = correlation
            .milk_followed_by_vomit
            .map(|r| {
                vec![
                    FollowUpRow { window_minutes: 30, feeds: r.within_30min, rate_percent: metrics::finite(r.rate_30min) * 100.0 },
                    FollowUpRow { window_minutes: 60, feeds: r.within_60min, rate_percent: metrics::finite(r.rate_60min) * 100.0 },
                    FollowUpRow { window_minutes: 120, feeds: r.within_120min, rate_percent: metrics::finite(r.rate_120min) * 100.0 },
                ]
            })
            .unwrap_or_default();

        let rows = daily.unwrap_or_default();
        let daily_series = correlation_points(rows, |_| 0.0, |r| r.vomit_count)
            .into_iter()
            .map(|p| TimeSeriesPoint { date: p.label, value: p.y })
            .collect();
        let scatter = correlation_points(rows, |r| r.milk_amount, |r| r.vomit_count);
        let severity = severity_distribution(events.unwrap_or_default());

        let strongest = correlations
            .iter()
            .max_by(|a, b| a.coefficient.abs().total_cmp(&b.coefficient.abs()));
        let mut cards = vec![SummaryCard::new("最も多い時間帯", peak_hour.to_string())];
        if let Some(row) = strongest {
            cards.push(
                SummaryCard::new("最も強い相関", row.label.clone())
                    .detail(format!("r = {:.2} ({})", row.coefficient, row.strength)),
            );
        }
        if let Some(within_hour) = follow_up.iter().find(|r| r.window_minutes == 60) {
            cards.push(SummaryCard::new(
                "授乳後60分以内の吐き戻し",
                format!("{:.1}%", within_hour.rate_percent),
            ));
        }

        Loaded::Ready(Self {
            correlations,
            hourly,
            peak_hour,
            follow_up,
            daily_series,
            scatter,
            severity,
            secondary_unavailable: daily.is_none() || events.is_none(),
            cards,
        })
    }
}

async fn daily_rows(api: &dyn CareApi) -> Result<Vec<DailySummaryRow>, ClientError> {
    Ok(api
        .daily_summary(&DateRange::default())
        .await?
        .into_result()?
        .unwrap_or_default())
}

async fn vomit_events(api: &dyn CareApi) -> Result<Vec<EventRecord>, ClientError> {
    Ok(api
        .events(&EventFilter::category("vomit"))
        .await?
        .into_result()?
        .unwrap_or_default())
}

/// Secondary data is best effort: failures are logged and leave it out
fn degrade<T>(what: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(dataset = what, error = %e, "Secondary fetch failed; rendering without it");
            None
        }
    }
}

/// `GET /analysis/vomit-correlation`, then `/summary/daily` and
/// `/events?category=vomit` when the first call succeeded
pub async fn load(api: &dyn CareApi) -> Result<Loaded<VomitView>, ClientError> {
    let correlation = match api.vomit_correlation().await?.into_result()? {
        Some(c) if !c.is_blank() => c,
        _ => {
            tracing::info!("Vomit correlation empty; skipping secondary fetches");
            return Ok(Loaded::Empty);
        }
    };

    let daily = degrade("daily_summary", daily_rows(api).await);
    let events = degrade("vomit_events", vomit_events(api).await);

    let view = VomitView::from_parts(&correlation, daily.as_deref(), events.as_deref());
    tracing::info!(
        degraded = daily.is_none() || events.is_none(),
        "Vomit correlation loaded"
    );
    Ok(view)
}
