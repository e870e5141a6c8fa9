//! Growth page: weight and height over time, body temperature and fever days

use serde::Serialize;
use std::collections::BTreeMap;

use super::SummaryCard;
use crate::api::dto::calendar_day;
use crate::api::{CareApi, ClientError, GrowthData, GrowthFilter, GrowthRecord};
use crate::charts::{zip_series, TimeSeriesPoint};
use crate::metrics;
use crate::view::Loaded;

/// Summary of one measurement series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthMetric {
    pub unit: &'static str,
    pub series: Vec<TimeSeriesPoint>,
    pub first: f64,
    pub latest: f64,
    pub change: f64,
    /// Percent change from first to latest
    pub rate_percent: f64,
    /// `rate_percent` spread over the intervals between records
    pub avg_rate_percent: f64,
}

impl GrowthMetric {
    fn from_records(
        records: &[GrowthRecord],
        unit: &'static str,
        convert: impl Fn(&GrowthRecord) -> f64,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let dates: Vec<String> = records.iter().map(|r| r.date.clone()).collect();
        let values: Vec<Option<f64>> = records.iter().map(|r| Some(convert(r))).collect();
        let series = zip_series(&dates, &values, |v| v);

        let first = series.first().map(|p| p.value).unwrap_or(0.0);
        let latest = series.last().map(|p| p.value).unwrap_or(0.0);
        let rate_percent = metrics::growth_rate(first, latest);

        Some(Self {
            unit,
            first,
            latest,
            change: latest - first,
            rate_percent,
            avg_rate_percent: metrics::average_rate(rate_percent, series.len()),
            series,
        })
    }

    fn cards(&self, label: &str, format: fn(f64) -> String) -> Vec<SummaryCard> {
        vec![
            SummaryCard::new(format!("最新の{}", label), format(self.latest))
                .detail(format!("初回 {}", format(self.first))),
            SummaryCard::new(format!("{}の増加", label), format(self.change)).detail(format!(
                "{} (1回あたり {})",
                metrics::format_percent(self.rate_percent),
                metrics::format_percent(self.avg_rate_percent)
            )),
        ]
    }
}

/// Weight in kg; gram records are divided by 1000
fn weight_kg(record: &GrowthRecord) -> f64 {
    let value = metrics::finite(record.value);
    match record.unit.as_deref().map(str::trim) {
        Some("g") => metrics::grams_to_kg(value),
        Some(_) => value,
        // unitless weights above 100 can only be grams
        None if value > 100.0 => metrics::grams_to_kg(value),
        None => value,
    }
}

/// Readings at or above this count as a fever
pub const FEVER_THRESHOLD_CELSIUS: f64 = 37.5;

/// Body-temperature statistics over every reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSummary {
    /// Highest reading of each day
    pub series: Vec<TimeSeriesPoint>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 for a single reading
    pub std_dev: f64,
    /// Days with at least one fever reading, ascending
    pub fever_days: Vec<String>,
}

impl TemperatureSummary {
    fn from_records(records: &[GrowthRecord]) -> Option<Self> {
        let mut readings: Vec<(String, f64)> = records
            .iter()
            .filter(|r| r.value.is_finite())
            .map(|r| (calendar_day(&r.date), r.value))
            .filter(|(day, _)| !day.is_empty())
            .collect();
        if readings.is_empty() {
            return None;
        }

        let mut daily_max: BTreeMap<String, f64> = BTreeMap::new();
        for (day, value) in &readings {
            let entry = daily_max.entry(day.clone()).or_insert(*value);
            *entry = entry.max(*value);
        }
        let fever_days = daily_max
            .iter()
            .filter(|(_, max)| **max >= FEVER_THRESHOLD_CELSIUS)
            .map(|(day, _)| day.clone())
            .collect();
        let series = daily_max
            .into_iter()
            .map(|(date, value)| TimeSeriesPoint { date, value })
            .collect();

        readings.sort_by(|a, b| a.1.total_cmp(&b.1));
        let values: Vec<f64> = readings.into_iter().map(|(_, v)| v).collect();
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        } else {
            values[n / 2]
        };
        let std_dev = if n > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            series,
            min: values[0],
            max: values[n - 1],
            mean: metrics::finite(mean),
            median,
            std_dev: metrics::finite(std_dev),
            fever_days,
        })
    }

    fn cards(&self) -> Vec<SummaryCard> {
        let fever_detail = if self.fever_days.is_empty() {
            "なし".to_string()
        } else {
            self.fever_days.join(", ")
        };
        vec![
            SummaryCard::new("平均体温", metrics::format_celsius(self.mean)).detail(format!(
                "{} 〜 {}",
                metrics::format_celsius(self.min),
                metrics::format_celsius(self.max)
            )),
            SummaryCard::new("発熱日数", format!("{} 日", self.fever_days.len()))
                .detail(fever_detail),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthView {
    pub weight: Option<GrowthMetric>,
    pub height: Option<GrowthMetric>,
    pub temperature: Option<TemperatureSummary>,
    pub cards: Vec<SummaryCard>,
}

impl GrowthView {
    pub fn from_payload(data: &GrowthData) -> Loaded<Self> {
        if data.is_blank() {
            return Loaded::Empty;
        }

        let weight = GrowthMetric::from_records(&data.weight_records, "kg", weight_kg);
        let height = GrowthMetric::from_records(&data.height_records, "cm", |r| {
            metrics::finite(r.value)
        });
        let temperature = TemperatureSummary::from_records(&data.temperature_records);

        let mut cards = Vec::new();
        if let Some(w) = &weight {
            cards.extend(w.cards("体重", metrics::format_kg));
        }
        if let Some(h) = &height {
            cards.extend(h.cards("身長", metrics::format_cm));
        }
        if let Some(t) = &temperature {
            cards.extend(t.cards());
        }

        Loaded::Ready(Self {
            weight,
            height,
            temperature,
            cards,
        })
    }
}

/// `GET /growth`
pub async fn load(api: &dyn CareApi) -> Result<Loaded<GrowthView>, ClientError> {
    let data = api.growth(&GrowthFilter::default()).await?.into_result()?;
    let view = match data {
        Some(d) => GrowthView::from_payload(&d),
        None => Loaded::Empty,
    };
    tracing::info!(empty = matches!(view, Loaded::Empty), "Growth records loaded");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, value: f64, unit: Option<&str>) -> GrowthRecord {
        GrowthRecord {
            date: date.to_string(),
            value,
            unit: unit.map(String::from),
        }
    }

    #[test]
    fn test_weight_converted_and_rated() {
        let data = GrowthData {
            weight_records: vec![
                record("2024-03-01", 5000.0, Some("g")),
                record("2024-02-01", 4.0, Some("kg")),
                record("2024-02-15", 4500.0, None),
            ],
            ..Default::default()
        };
        let view = match GrowthView::from_payload(&data) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        let weight = view.weight.unwrap();
        assert_eq!(weight.first, 4.0);
        assert_eq!(weight.latest, 5.0);
        assert_eq!(weight.change, 1.0);
        assert!((weight.rate_percent - 25.0).abs() < 1e-9);
        assert!((weight.avg_rate_percent - 12.5).abs() < 1e-9);
        assert!(view.height.is_none());
        assert_eq!(view.cards[0].value, "5.00 kg");
    }

    #[test]
    fn test_zero_first_measurement() {
        let data = GrowthData {
            height_records: vec![record("2024-02-01", 0.0, Some("cm")), record("2024-03-01", 55.0, Some("cm"))],
            ..Default::default()
        };
        let view = match GrowthView::from_payload(&data) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        let height = view.height.unwrap();
        assert_eq!(height.rate_percent, 0.0);
        assert_eq!(height.avg_rate_percent, 0.0);
    }

    #[test]
    fn test_single_record_rate() {
        let metric = GrowthMetric::from_records(&[record("2024-02-01", 50.0, None)], "cm", |r| r.value)
            .unwrap();
        assert_eq!(metric.change, 0.0);
        assert_eq!(metric.avg_rate_percent, 0.0);
    }

    #[test]
    fn test_temperature_only_is_ready_with_fever_days() {
        let data = GrowthData {
            temperature_records: vec![
                record("2024-02-01T08:00:00", 36.9, Some("°C")),
                record("2024-02-01T20:00:00", 38.2, Some("°C")),
                record("2024-02-02T08:00:00", 36.8, Some("°C")),
                record("2024-02-03T08:00:00", 37.5, Some("°C")),
            ],
            ..Default::default()
        };
        let view = match GrowthView::from_payload(&data) {
            Loaded::Ready(v) => v,
            Loaded::Empty => panic!("expected ready"),
        };
        assert!(view.weight.is_none());
        let temp = view.temperature.unwrap();
        assert_eq!(temp.fever_days, vec!["2024-02-01", "2024-02-03"]);
        assert_eq!(temp.series.len(), 3);
        assert_eq!(temp.series[0].value, 38.2);
        assert_eq!(temp.min, 36.8);
        assert_eq!(temp.max, 38.2);
        assert!((temp.median - 37.2).abs() < 1e-9);
        assert!((temp.mean - 37.35).abs() < 1e-9);
        assert_eq!(view.cards[1].value, "2 日");
        assert_eq!(view.cards[1].detail.as_deref(), Some("2024-02-01, 2024-02-03"));
    }

    #[test]
    fn test_single_temperature_reading() {
        let temp = TemperatureSummary::from_records(&[record("2024-02-01", 36.5, None)]).unwrap();
        assert_eq!(temp.std_dev, 0.0);
        assert_eq!(temp.median, 36.5);
        assert!(temp.fever_days.is_empty());
        assert_eq!(temp.cards()[1].detail.as_deref(), Some("なし"));
    }

    #[test]
    fn test_both_lists_empty() {
        assert_eq!(GrowthView::from_payload(&GrowthData::default()), Loaded::Empty);
    }
}
