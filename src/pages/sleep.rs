//! Sleep page: timing, duration and fragmentation

use serde::Serialize;

use super::SummaryCard;
use crate::api::{CareApi, ClientError, SleepPatterns};
use crate::charts::{hourly_distribution, DistributionBucket, HeatRow};
use crate::metrics::{self, Peak};
use crate::view::Loaded;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepView {
    pub avg_sleep_hours: f64,
    pub min_sleep_hours: f64,
    pub max_sleep_hours: f64,
    /// Wake-ups per hour of sleep, averaged over days
    pub fragmentation: f64,
    pub avg_nap_hours: f64,
    pub start_distribution: Vec<DistributionBucket>,
    pub wake_distribution: Vec<DistributionBucket>,
    pub peak_start_hour: Peak,
    pub peak_wake_hour: Peak,
    pub heat_rows: Vec<HeatRow>,
    pub cards: Vec<SummaryCard>,
}

impl SleepView {
    pub fn from_payload(patterns: &SleepPatterns) -> Loaded<Self> {
        if patterns.is_blank() {
            return Loaded::Empty;
        }

        // hours block wins when both are present
        let (avg, min, max) = match (&patterns.daily_sleep_hours, &patterns.daily_sleep_minutes) {
            (Some(h), _) => (h.mean, h.min, h.max),
            (None, Some(m)) => (
                metrics::minutes_to_hours(m.mean),
                metrics::minutes_to_hours(m.min),
                metrics::minutes_to_hours(m.max),
            ),
            (None, None) => (0.0, 0.0, 0.0),
        };
        let avg_sleep_hours = metrics::finite(avg);

        let fragmentation = patterns
            .sleep_fragmentation
            .map(|s| metrics::finite(s.mean))
            .unwrap_or(0.0);
        let avg_nap_hours = patterns
            .sleep_duration_minutes
            .map(|s| metrics::minutes_to_hours(s.mean))
            .unwrap_or(0.0);

        let start_distribution = hourly_distribution(&patterns.sleep_start_distribution);
        let wake_distribution = hourly_distribution(&patterns.wake_time_distribution);
        let peak_start_hour = metrics::most_common(&start_distribution);
        let peak_wake_hour = metrics::most_common(&wake_distribution);

        let heat_rows = vec![
            HeatRow::from_buckets("入眠", &start_distribution),
            HeatRow::from_buckets("起床", &wake_distribution),
        ];

        let cards = vec![
            SummaryCard::new("平均睡眠時間", metrics::format_hours(avg_sleep_hours)).detail(format!(
                "{} 〜 {}",
                metrics::format_hours(min),
                metrics::format_hours(max)
            )),
            SummaryCard::new("平均睡眠の長さ", metrics::format_hours(avg_nap_hours)),
            SummaryCard::new("睡眠の断片化", format!("{:.2}", fragmentation))
                .detail("起床回数 / 睡眠時間"),
            SummaryCard::new("最も多い入眠時刻", peak_start_hour.to_string()),
        ];

        Loaded::Ready(Self {
            avg_sleep_hours,
            min_sleep_hours: metrics::finite(min),
            max_sleep_hours: metrics::finite(max),
            fragmentation,
            avg_nap_hours,
            start_distribution,
            wake_distribution,
            peak_start_hour,
            peak_wake_hour,
            heat_rows,
            cards,
        })
    }
}

/// `GET /analysis/sleep-patterns`
pub async fn load(api: &dyn CareApi) -> Result<Loaded<SleepView>, ClientError> {
    let patterns = api.sleep_patterns().await?.into_result()?;
    let view = match patterns {
        Some(p) => SleepView::from_payload(&p),
        None => Loaded::Empty,
    };
    tracing::info!(empty = matches!(view, Loaded::Empty), "Sleep patterns loaded");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(json: &str) -> SleepView {
        let patterns: SleepPatterns = serde_json::from_str(json).unwrap();
        match SleepView::from_payload(&patterns) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        }
    }

    #[test]
    fn test_sleep_metrics() {
        let view = ready(
            r#"{"daily_sleep_minutes":{"mean":600,"min":480,"max":720},
                "sleep_start_distribution":{"13":2,"20":5},
                "wake_time_distribution":{"6":4},
                "sleep_duration_minutes":{"mean":90},
                "sleep_fragmentation":{"mean":0.35}}"#,
        );
        assert_eq!(view.avg_sleep_hours, 10.0);
        assert_eq!(view.min_sleep_hours, 8.0);
        assert_eq!(view.avg_nap_hours, 1.5);
        assert_eq!(view.fragmentation, 0.35);
        assert_eq!(view.peak_start_hour, Peak::Label("20時".into()));
        assert_eq!(view.peak_wake_hour, Peak::Label("6時".into()));
        assert_eq!(view.heat_rows.len(), 2);
        assert_eq!(view.heat_rows[0].cells.len(), 24);
    }

    #[test]
    fn test_missing_blocks_are_zero() {
        let view = ready(r#"{"daily_sleep_hours":{"mean":null},"sleep_start_distribution":{}}"#);
        assert_eq!(view.avg_sleep_hours, 0.0);
        assert_eq!(view.avg_nap_hours, 0.0);
        assert_eq!(view.peak_start_hour, Peak::Unknown);
        assert_eq!(view.cards[3].value, "不明");
    }

    #[test]
    fn test_empty_object_is_empty() {
        let patterns: SleepPatterns = serde_json::from_str("{}").unwrap();
        assert_eq!(SleepView::from_payload(&patterns), Loaded::Empty);
    }
}
