//! gloo-net backed `CareApi`

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use cradle::api::dto::*;
use cradle::api::{endpoint_url, normalize_base, paths, CareApi, ClientError, ClientResult};

fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// Browser client bound to one base URL
#[derive(Debug, Clone)]
pub struct GlooClient {
    base_url: String,
}

impl GlooClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base(base_url),
        }
    }

    /// Client for the configured backend
    pub fn from_storage() -> Self {
        Self::new(&super::get_api_base())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = endpoint_url(&self.base_url, path, query);

        let response = Request::get(&url).send().await.map_err(|e| {
            log_error(&format!("GET {} failed: {}", url, e));
            ClientError::Transport(e.to_string())
        })?;

        Self::decode(&url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = endpoint_url(&self.base_url, path, &[]);

        let response = Request::post(&url)
            .json(body)
            .map_err(|e| ClientError::Invalid(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| {
                log_error(&format!("POST {} failed: {}", url, e));
                ClientError::Transport(e.to_string())
            })?;

        Self::decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ClientResult<T> {
        let status = response.status();
        let ok = response.ok();
        let status_text = response.status_text();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !ok {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or(status_text);
            log_error(&format!("{} returned {}: {}", url, status, message));
            return Err(ClientError::Http { status, message });
        }

        serde_json::from_str(&text).map_err(|e| {
            log_error(&format!("Failed to decode {}: {}", url, e));
            ClientError::from(e)
        })
    }
}

#[async_trait(?Send)]
impl CareApi for GlooClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.get_json(paths::HEALTH, &[]).await
    }

    async fn parse(&self, request: &FileRequest) -> ClientResult<Envelope<ParseSummary>> {
        self.post_json(paths::PARSE, request).await
    }

    async fn analyze(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>> {
        self.get_json(paths::ANALYZE, &[]).await
    }

    async fn process(&self, request: &FileRequest) -> ClientResult<Envelope<ProcessSummary>> {
        self.post_json(paths::PROCESS, request).await
    }

    async fn events(&self, filter: &EventFilter) -> ClientResult<Envelope<Vec<EventRecord>>> {
        self.get_json(paths::EVENTS, &filter.pairs()).await
    }

    async fn daily_summary(
        &self,
        range: &DateRange,
    ) -> ClientResult<Envelope<Vec<DailySummaryRow>>> {
        self.get_json(paths::DAILY_SUMMARY, &range.pairs()).await
    }

    async fn growth(&self, filter: &GrowthFilter) -> ClientResult<Envelope<GrowthData>> {
        self.get_json(paths::GROWTH, &filter.pairs()).await
    }

    async fn vomit_correlation(&self) -> ClientResult<Envelope<VomitCorrelation>> {
        self.get_json(paths::VOMIT_CORRELATION, &[]).await
    }

    async fn sleep_patterns(&self) -> ClientResult<Envelope<SleepPatterns>> {
        self.get_json(paths::SLEEP_PATTERNS, &[]).await
    }

    async fn feeding_patterns(&self) -> ClientResult<Envelope<FeedingPatterns>> {
        self.get_json(paths::FEEDING_PATTERNS, &[]).await
    }

    async fn comprehensive_analysis(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>> {
        self.get_json(paths::COMPREHENSIVE, &[]).await
    }
}
