//! Backend API
//!
//! The contract between the dashboard and the analysis backend: endpoint
//! paths, wire types, and the [`CareApi`] trait every client implements.
//!
//! Each method issues exactly one HTTP call. There is no retry, caching or
//! timeout at this layer; callers decide what a failure means.
//!
//! Two implementations exist: [`HttpClient`] (native, `reqwest`) in this
//! crate, and the browser client in `cradle-ui`. Both are constructed
//! explicitly with a base URL and passed to page loaders as `&dyn CareApi`.

use async_trait::async_trait;

#[cfg(feature = "native")]
mod client;
pub mod dto;
pub mod error;

#[cfg(feature = "native")]
pub use client::HttpClient;
pub use dto::{
    ComprehensiveAnalysis, CorrelationItem, CorrelationStat, DailySeries, DailySummaryRow,
    DateRange, Envelope, EventFilter, EventRecord, FeedingPatterns, FileRequest, FollowUpRates,
    GrowthData, GrowthFilter, GrowthRecord, HealthStatus, KeyedCounts, LabeledSeries,
    ParseSummary, ProcessSummary, SleepPatterns, SummaryStats, VomitCorrelation,
};
pub use error::{ClientError, ClientResult};

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// CSV exports the backend is willing to serve
pub const CSV_EXPORTS: [&str; 3] = ["events.csv", "daily_summary.csv", "growth.csv"];

/// Endpoint paths, relative to the base URL
pub mod paths {
    pub const HEALTH: &str = "/health";
    pub const PARSE: &str = "/parse";
    pub const ANALYZE: &str = "/analyze";
    pub const PROCESS: &str = "/process";
    pub const EVENTS: &str = "/events";
    pub const DAILY_SUMMARY: &str = "/summary/daily";
    pub const GROWTH: &str = "/growth";
    pub const VOMIT_CORRELATION: &str = "/analysis/vomit-correlation";
    pub const SLEEP_PATTERNS: &str = "/analysis/sleep-patterns";
    pub const FEEDING_PATTERNS: &str = "/analysis/feeding-patterns";
    pub const COMPREHENSIVE: &str = "/analysis/comprehensive";
    pub const CSV: &str = "/data/csv";
}

/// Strip trailing slashes so paths can be appended verbatim
pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Join a base URL, a path and optional query pairs
pub fn endpoint_url(base: &str, path: &str, query: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", base, path);
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Download link for one of the backend's CSV exports.
///
/// Only names in [`CSV_EXPORTS`] are accepted; the URL is built, never fetched.
pub fn csv_url(base: &str, filename: &str) -> ClientResult<String> {
    if !CSV_EXPORTS.contains(&filename) {
        return Err(ClientError::Invalid(format!(
            "Unknown CSV export: {}",
            filename
        )));
    }
    Ok(format!("{}{}/{}", base, paths::CSV, filename))
}

/// One method per backend endpoint.
///
/// `?Send` keeps the trait usable from the single-threaded WASM client.
#[async_trait(?Send)]
pub trait CareApi {
    /// Base URL every request is resolved against
    fn base_url(&self) -> &str;

    async fn health(&self) -> ClientResult<HealthStatus>;

    async fn parse(&self, request: &FileRequest) -> ClientResult<Envelope<ParseSummary>>;

    async fn analyze(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>>;

    async fn process(&self, request: &FileRequest) -> ClientResult<Envelope<ProcessSummary>>;

    async fn events(&self, filter: &EventFilter) -> ClientResult<Envelope<Vec<EventRecord>>>;

    async fn daily_summary(&self, range: &DateRange)
        -> ClientResult<Envelope<Vec<DailySummaryRow>>>;

    async fn growth(&self, filter: &GrowthFilter) -> ClientResult<Envelope<GrowthData>>;

    async fn vomit_correlation(&self) -> ClientResult<Envelope<VomitCorrelation>>;

    async fn sleep_patterns(&self) -> ClientResult<Envelope<SleepPatterns>>;

    async fn feeding_patterns(&self) -> ClientResult<Envelope<FeedingPatterns>>;

    async fn comprehensive_analysis(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>>;

    fn csv_url(&self, filename: &str) -> ClientResult<String> {
        csv_url(self.base_url(), filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(
            normalize_base("http://localhost:5000/api/"),
            "http://localhost:5000/api"
        );
        assert_eq!(normalize_base(DEFAULT_API_BASE), DEFAULT_API_BASE);
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let url = endpoint_url(
            DEFAULT_API_BASE,
            paths::EVENTS,
            &[("category", "vomit"), ("start_date", "2024/02/01")],
        );
        assert_eq!(
            url,
            "http://localhost:5000/api/events?category=vomit&start_date=2024%2F02%2F01"
        );
    }

    #[test]
    fn test_csv_url_allow_list() {
        assert_eq!(
            csv_url(DEFAULT_API_BASE, "growth.csv").unwrap(),
            "http://localhost:5000/api/data/csv/growth.csv"
        );
        assert!(matches!(
            csv_url(DEFAULT_API_BASE, "../secrets.csv"),
            Err(ClientError::Invalid(_))
        ));
    }
}
