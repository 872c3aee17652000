//! HTTP client helpers for tests.

use std::time::Duration;

use covenant::compare::ComparisonRecord;
use covenant::report::AnalysisSummary;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn add_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Content-Type", "application/json")
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    /// POSTs two text documents to `/v1/analysis`.
    pub async fn analysis(
        &self,
        bank: &str,
        partner: &str,
    ) -> Result<(AnalysisResult, String), TestClientError> {
        self.analysis_raw(json!({
            "bank": { "text": bank },
            "partner": { "text": partner },
        }))
        .await
    }

    /// POSTs an arbitrary body to `/v1/analysis`, returning the parsed
    /// response and the `X-Covenant-Status` header value.
    pub async fn analysis_raw(
        &self,
        body: serde_json::Value,
    ) -> Result<(AnalysisResult, String), TestClientError> {
        let builder = self.add_headers(self.client.post(self.url("/v1/analysis")));
        let resp = builder.json(&body).send().await?;

        let status_header = resp
            .headers()
            .get("x-covenant-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok((resp.json().await?, status_header)),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    /// POSTs records to `/v1/analysis/export`, returning the rendered body
    /// and its content type.
    pub async fn export(
        &self,
        records: &[ComparisonRecord],
        format: &str,
    ) -> Result<(String, String), TestClientError> {
        let builder = self.add_headers(self.client.post(self.url("/v1/analysis/export")));
        let resp = builder
            .json(&json!({ "records": records, "format": format }))
            .send()
            .await?;

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();

        match resp.status().as_u16() {
            200 => Ok((resp.text().await?, content_type)),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    /// POSTs to `/v1/analysis/stream` and collects the whole SSE body.
    pub async fn analysis_stream(
        &self,
        bank: &str,
        partner: &str,
    ) -> Result<String, TestClientError> {
        self.collect_sse(
            "/v1/analysis/stream",
            json!({
                "bank": { "text": bank },
                "partner": { "text": partner },
            }),
        )
        .await
    }

    /// POSTs to `/v1/analysis/chat` and collects the whole SSE body.
    pub async fn chat(
        &self,
        records: &[ComparisonRecord],
        question: &str,
    ) -> Result<String, TestClientError> {
        self.collect_sse(
            "/v1/analysis/chat",
            json!({ "records": records, "question": question }),
        )
        .await
    }

    async fn collect_sse(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<String, TestClientError> {
        let builder = self.add_headers(self.client.post(self.url(path)));
        let resp = builder.json(&body).send().await?;

        match resp.status().as_u16() {
            200 => Ok(resp.text().await?),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub embedder: String,
    pub judge: String,
    pub advisor: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Analysis response body as seen on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    pub run_id: String,
    pub fingerprint: String,
    pub mode: String,
    pub bank_clauses: usize,
    pub partner_clauses: usize,
    pub records: Vec<ComparisonRecord>,
    pub summary: AnalysisSummary,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}
