//! Feeding page: milk volume, frequency and timing

use serde::Serialize;

use super::SummaryCard;
use crate::api::{CareApi, ClientError, FeedingPatterns};
use crate::charts::{hourly_distribution, DistributionBucket, HeatRow};
use crate::metrics::{self, Peak};
use crate::view::Loaded;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedingView {
    pub avg_daily_ml: f64,
    pub avg_daily_count: f64,
    /// Mean single-feed volume
    pub avg_feed_ml: f64,
    pub avg_interval_hours: f64,
    pub milk_distribution: Vec<DistributionBucket>,
    pub food_distribution: Vec<DistributionBucket>,
    pub peak_milk_hour: Peak,
    pub heat_rows: Vec<HeatRow>,
    pub cards: Vec<SummaryCard>,
}

impl FeedingView {
    pub fn from_payload(patterns: &FeedingPatterns) -> Loaded<Self> {
        if patterns.is_blank() {
            return Loaded::Empty;
        }

        let mean = |s: Option<crate::api::SummaryStats>| s.map(|s| metrics::finite(s.mean)).unwrap_or(0.0);
        let avg_daily_ml = mean(patterns.daily_milk_amount);
        let avg_daily_count = mean(patterns.daily_milk_count);
        let avg_feed_ml = mean(patterns.milk_amount_distribution);
        let avg_interval_hours = metrics::minutes_to_hours(mean(patterns.milk_interval_minutes));

        let milk_distribution = hourly_distribution(&patterns.milk_time_distribution);
        let food_distribution = hourly_distribution(&patterns.food_time_distribution);
        let peak_milk_hour = metrics::most_common(&milk_distribution);

        let heat_rows = vec![
            HeatRow::from_buckets("ミルク", &milk_distribution),
            HeatRow::from_buckets("離乳食", &food_distribution),
        ];

        let cards = vec![
            SummaryCard::new("1日の平均授乳量", metrics::format_ml(avg_daily_ml))
                .detail(format!("1回あたり {}", metrics::format_ml(avg_feed_ml))),
            SummaryCard::new("1日の平均授乳回数", metrics::format_times(avg_daily_count)),
            SummaryCard::new("平均授乳間隔", metrics::format_hours(avg_interval_hours)),
            SummaryCard::new("最も多い授乳時刻", peak_milk_hour.to_string()),
        ];

        Loaded::Ready(Self {
            avg_daily_ml,
            avg_daily_count,
            avg_feed_ml,
            avg_interval_hours,
            milk_distribution,
            food_distribution,
            peak_milk_hour,
            heat_rows,
            cards,
        })
    }
}

/// `GET /analysis/feeding-patterns`
pub async fn load(api: &dyn CareApi) -> Result<Loaded<FeedingView>, ClientError> {
    let patterns = api.feeding_patterns().await?.into_result()?;
    let view = match patterns {
        Some(p) => FeedingView::from_payload(&p),
        None => Loaded::Empty,
    };
    tracing::info!(empty = matches!(view, Loaded::Empty), "Feeding patterns loaded");
    Ok(view)
}
