//! Dashboard page: overview of the comprehensive analysis

use serde::Serialize;

use super::vomit::{correlation_rows, CorrelationRow};
use super::SummaryCard;
use crate::api::{CareApi, ClientError, ComprehensiveAnalysis, LabeledSeries};
use crate::charts::{
    hourly_distribution, hourly_from_values, labeled_points, zip_series, DistributionBucket,
    TimeSeriesPoint,
};
use crate::metrics::{self, Peak};
use crate::view::Loaded;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub avg_sleep_hours: f64,
    pub avg_milk_ml: f64,
    pub avg_milk_count: f64,
    pub avg_vomit_count: f64,
    pub cards: Vec<SummaryCard>,
    /// Daily sleep in hours
    pub sleep_series: Vec<TimeSeriesPoint>,
    /// Daily milk in ml
    pub milk_series: Vec<TimeSeriesPoint>,
    pub vomit_series: Vec<TimeSeriesPoint>,
    /// Weight in kg per measurement day
    pub weight_series: Vec<TimeSeriesPoint>,
    /// Height in cm per measurement day
    pub height_series: Vec<TimeSeriesPoint>,
    pub vomit_hourly: Vec<DistributionBucket>,
    pub peak_vomit_hour: Peak,
    pub correlations: Vec<CorrelationRow>,
    pub summary_text: Option<String>,
}

/// Prepared series may come in minutes or hours; normalize to hours
fn sleep_hours(series: &LabeledSeries) -> Vec<TimeSeriesPoint> {
    let in_minutes = series
        .unit
        .as_deref()
        .map(|u| u.contains('分') || u.contains("min"))
        .unwrap_or(false);
    if in_minutes {
        labeled_points(series, metrics::minutes_to_hours)
    } else {
        labeled_points(series, |h| h)
    }
}

impl DashboardView {
    pub fn from_payload(analysis: &ComprehensiveAnalysis) -> Loaded<Self> {
        let mean = |metric: &str| analysis.stat(metric).map(|s| metrics::finite(s.mean)).unwrap_or(0.0);

        let avg_sleep_hours = metrics::minutes_to_hours(mean("sleep_minutes"));
        let avg_milk_ml = mean("milk_amount");
        let avg_milk_count = mean("milk_count");
        let avg_vomit_count = mean("vomit_count");

        let ts = &analysis.time_series;
        let (sleep_series, milk_series, vomit_series) = match ts.daily.as_ref().filter(|d| !d.dates.is_empty()) {
            Some(daily) => (
                zip_series(&daily.dates, &daily.sleep_minutes, metrics::minutes_to_hours),
                zip_series(&daily.dates, &daily.milk_amount, |v| v),
                zip_series(&daily.dates, &daily.vomit_count, |v| v),
            ),
            None => (
                ts.sleep.as_ref().map(sleep_hours).unwrap_or_default(),
                ts.milk.as_ref().map(|s| labeled_points(s, |v| v)).unwrap_or_default(),
                ts.vomit.as_ref().map(|s| labeled_points(s, |v| v)).unwrap_or_default(),
            ),
        };

        let growth = &analysis.growth;
        let weight_series = growth.weight.as_ref().map(|s| labeled_points(s, |v| v)).unwrap_or_default();
        let height_series = growth.height.as_ref().map(|s| labeled_points(s, |v| v)).unwrap_or_default();

        if !analysis.has_stats()
            && sleep_series.is_empty()
            && milk_series.is_empty()
            && vomit_series.is_empty()
            && weight_series.is_empty()
            && height_series.is_empty()
        {
            return Loaded::Empty;
        }

        let vomit_hourly = match (&analysis.hourly_patterns.vomit, &analysis.vomit_correlation) {
            (Some(series), _) if !series.is_empty() => hourly_from_values(series),
            (_, Some(vc)) => hourly_distribution(&vc.vomit_hour_distribution),
            _ => hourly_distribution(&Default::default()),
        };
        let peak_vomit_hour = metrics::most_common(&vomit_hourly);

        let correlations = if analysis.correlations.is_empty() {
            analysis
                .vomit_correlation
                .as_ref()
                .map(correlation_rows)
                .unwrap_or_default()
        } else {
            analysis.correlations.iter().map(CorrelationRow::from).collect()
        };

        let cards = vec![
            SummaryCard::new("平均睡眠時間", metrics::format_hours(avg_sleep_hours)),
            SummaryCard::new("平均授乳量", metrics::format_ml(avg_milk_ml)),
            SummaryCard::new("平均授乳回数", metrics::format_times(avg_milk_count)),
            SummaryCard::new("平均吐き戻し回数", metrics::format_times(avg_vomit_count))
                .detail(format!("最多時間帯: {}", peak_vomit_hour)),
        ];

        Loaded::Ready(Self {
            avg_sleep_hours,
            avg_milk_ml,
            avg_milk_count,
            avg_vomit_count,
            cards,
            sleep_series,
            milk_series,
            vomit_series,
            weight_series,
            height_series,
            vomit_hourly,
            peak_vomit_hour,
            correlations,
            summary_text: analysis
                .summary
                .text
                .clone()
                .filter(|t| !t.trim().is_empty()),
        })
    }
}

/// `GET /analysis/comprehensive`
pub async fn load(api: &dyn CareApi) -> Result<Loaded<DashboardView>, ClientError> {
    let analysis = api.comprehensive_analysis().await?.into_result()?;
    let view = match analysis {
        Some(a) => DashboardView::from_payload(&a),
        None => Loaded::Empty,
    };
    tracing::info!(empty = matches!(view, Loaded::Empty), "Dashboard loaded");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ComprehensiveAnalysis {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_average_sleep_in_hours() {
        let analysis = parse(
            r#"{"summary":{"stats":{"sleep_minutes":{"mean":480}}},
                "time_series":{"daily":{"dates":["2024-02-01"],"sleep_minutes":[480]}}}"#,
        );
        let view = match DashboardView::from_payload(&analysis) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        assert_eq!(view.cards[0].value, "8.0 時間");
        assert_eq!(view.sleep_series.len(), 1);
        assert_eq!(view.sleep_series[0].value, 8.0);
        assert_eq!(view.avg_milk_ml, 0.0);
    }

    #[test]
    fn test_daily_stats_block() {
        let analysis = parse(
            r#"{"daily_stats":{"milk_amount":{"count":3,"mean":650.0,"std":null},"vomit_count":{}}}"#,
        );
        let view = match DashboardView::from_payload(&analysis) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        assert_eq!(view.avg_milk_ml, 650.0);
        assert_eq!(view.avg_vomit_count, 0.0);
        assert_eq!(view.peak_vomit_hour, Peak::Unknown);
    }

    #[test]
    fn test_prepared_series_shape() {
        let analysis = parse(
            r#"{"time_series":{"sleep":{"labels":["2024-02-01","2024-02-02"],"data":[540,null],"unit":"分"},
                               "milk":{"labels":["2024-02-01"],"data":[700],"unit":"ml"}},
                "hourly_patterns":{"vomit":{"labels":["3時","4時"],"data":[1,2]}}}"#,
        );
        let view = match DashboardView::from_payload(&analysis) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        assert_eq!(view.sleep_series[0].value, 9.0);
        assert_eq!(view.sleep_series[1].value, 0.0);
        assert_eq!(view.milk_series[0].value, 700.0);
        assert_eq!(view.peak_vomit_hour, Peak::Label("4時".into()));
    }

    #[test]
    fn test_growth_series() {
        let analysis = parse(
            r#"{"growth":{"weight":{"labels":["2024-02-01","2024-03-01"],"data":[4.2,5.1]},
                          "height":{"labels":["2024-02-01"],"data":[55.0]}}}"#,
        );
        let view = match DashboardView::from_payload(&analysis) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        assert_eq!(view.weight_series.len(), 2);
        assert_eq!(view.weight_series[1].value, 5.1);
        assert_eq!(view.height_series[0].date, "2024-02-01");
        assert!(view.sleep_series.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(DashboardView::from_payload(&parse("{}")), Loaded::Empty);
        assert_eq!(
            DashboardView::from_payload(&parse(r#"{"time_series":{"daily":null}}"#)),
            Loaded::Empty
        );
    }
}
