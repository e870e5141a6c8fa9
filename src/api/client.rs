//! Native HTTP Client
//!
//! `reqwest`-backed [`CareApi`] used by the CLI and integration tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::dto::*;
use super::error::{ClientError, ClientResult};
use super::{endpoint_url, normalize_base, paths, CareApi};

/// Backend client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for the given base URL (trailing slashes trimmed)
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Reuse an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base(base_url),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let url = endpoint_url(&self.base_url, path, query);
        tracing::debug!(method = "GET", url = %url, "Backend request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Backend request failed");
            ClientError::from(e)
        })?;

        Self::decode(&url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = endpoint_url(&self.base_url, path, &[]);
        tracing::debug!(method = "POST", url = %url, "Backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Backend request failed");
                ClientError::from(e)
            })?;

        Self::decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await.map_err(ClientError::from)?;

        if !status.is_success() {
            // Error bodies are usually envelopes; surface their message if so
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

            tracing::error!(url = %url, status = status.as_u16(), message = %message, "Backend returned error status");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to decode backend response");
            ClientError::from(e)
        })
    }
}

#[async_trait(?Send)]
impl CareApi for HttpClient {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = HttpClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.csv_url("events.csv").unwrap(),
            "http://localhost:5000/api/data/csv/events.csv"
        );
    }
}
