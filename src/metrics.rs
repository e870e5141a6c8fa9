//! Derived Metrics
//!
//! Pure helpers every page uses to turn backend numbers into display values.
//! All of them are total: non-finite inputs come out as `0`.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::charts::DistributionBucket;

/// Coerce a missing or non-finite number to `0`
pub fn or_zero(value: Option<f64>) -> f64 {
    finite(value.unwrap_or(0.0))
}

/// Replace NaN/∞ with `0`
pub fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn minutes_to_hours(minutes: f64) -> f64 {
    finite(minutes) / 60.0
}

pub fn grams_to_kg(grams: f64) -> f64 {
    finite(grams) / 1000.0
}

/// Percentage change from `first` to `latest`.
///
/// Defined as `0` when `first` is `0`; this is a guard, not a real rate.
pub fn growth_rate(first: f64, latest: f64) -> f64 {
    let first = finite(first);
    if first == 0.0 {
        return 0.0;
    }
    finite((finite(latest) - first) / first * 100.0)
}

/// Spread a total rate over the intervals between `record_count` records
pub fn average_rate(rate: f64, record_count: usize) -> f64 {
    let intervals = record_count.saturating_sub(1).max(1);
    finite(rate) / intervals as f64
}

/// Most frequent label of a distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Peak {
    Label(String),
    /// Distribution was empty or had no positive counts
    Unknown,
}

impl Peak {
    pub fn label(&self) -> Option<&str> {
        match self {
            Peak::Label(l) => Some(l),
            Peak::Unknown => None,
        }
    }
}

impl Serialize for Peak {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peak::Label(l) => f.write_str(l),
            Peak::Unknown => f.write_str("不明"),
        }
    }
}

/// Label with the highest count; the first one wins ties.
pub fn most_common(buckets: &[DistributionBucket]) -> Peak {
    let mut best: Option<&DistributionBucket> = None;
    for bucket in buckets {
        if bucket.count == 0 {
            continue;
        }
        match best {
            Some(b) if b.count >= bucket.count => {}
            _ => best = Some(bucket),
        }
    }
    best.map(|b| Peak::Label(b.label.clone()))
        .unwrap_or(Peak::Unknown)
}

// ============ Formatting ============

pub fn format_hours(hours: f64) -> String {
    format!("{:.1} 時間", finite(hours))
}

pub fn format_ml(ml: f64) -> String {
    format!("{:.0} ml", finite(ml))
}

pub fn format_times(count: f64) -> String {
    format!("{:.1} 回", finite(count))
}

pub fn format_kg(kg: f64) -> String {
    format!("{:.2} kg", finite(kg))
}

pub fn format_cm(cm: f64) -> String {
    format!("{:.1} cm", finite(cm))
}

pub fn format_celsius(celsius: f64) -> String {
    format!("{:.1} ℃", finite(celsius))
}

pub fn format_percent(percent: f64) -> String {
    format!("{:+.1}%", finite(percent))
}

/// Verbal strength of a correlation coefficient, e.g. "正の弱い相関"
pub fn correlation_strength(coefficient: f64) -> String {
    let c = finite(coefficient);
    let strength = match c.abs() {
        a if a < 0.2 => "ほとんどなし",
        a if a < 0.4 => "弱い",
        a if a < 0.6 => "中程度",
        a if a < 0.8 => "強い",
        _ => "非常に強い",
    };
    let direction = if c >= 0.0 { "正" } else { "負" };
    format!("{}の{}相関", direction, strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::hourly_distribution;
    use std::collections::BTreeMap;

    fn bucket(label: &str, count: u64) -> DistributionBucket {
        DistributionBucket {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(or_zero(Some(2.5)), 2.5);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(minutes_to_hours(480.0), 8.0);
        assert_eq!(grams_to_kg(4250.0), 4.25);
        assert_eq!(minutes_to_hours(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_growth_rate_zero_first() {
        assert_eq!(growth_rate(0.0, 5.0), 0.0);
        assert_eq!(growth_rate(f64::NAN, 5.0), 0.0);
        assert!((growth_rate(4.0, 5.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_rate_single_record() {
        assert_eq!(average_rate(25.0, 0), 25.0);
        assert_eq!(average_rate(25.0, 1), 25.0);
        assert_eq!(average_rate(25.0, 6), 5.0);
    }

    #[test]
    fn test_most_common_all_zero_is_unknown() {
        let dist = hourly_distribution(&BTreeMap::new());
        assert_eq!(dist.len(), 24);
        assert_eq!(most_common(&dist), Peak::Unknown);
        assert_eq!(most_common(&[]), Peak::Unknown);
    }

    #[test]
    fn test_most_common_ties_pick_first() {
        let dist = vec![bucket("a", 1), bucket("b", 3), bucket("c", 3)];
        assert_eq!(most_common(&dist), Peak::Label("b".to_string()));
    }

    #[test]
    fn test_peak_display() {
        assert_eq!(Peak::Unknown.to_string(), "不明");
        assert_eq!(Peak::Label("7時".into()).to_string(), "7時");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_hours(8.0), "8.0 時間");
        assert_eq!(format_ml(f64::NAN), "0 ml");
        assert_eq!(format_percent(12.345), "+12.3%");
        assert_eq!(format_kg(4.2), "4.20 kg");
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(correlation_strength(0.1), "正のほとんどなし相関");
        assert_eq!(correlation_strength(-0.45), "負の中程度相関");
        assert_eq!(correlation_strength(0.85), "正の非常に強い相関");
    }
}
