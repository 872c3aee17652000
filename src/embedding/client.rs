use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_API_BASE, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL};

use super::EmbeddingProvider;
use super::error::EmbeddingError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`EmbeddingClient`].
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Base URL of the OpenAI-compatible API (no trailing slash required).
    pub api_base: String,
    /// Bearer token sent with each request.
    pub api_key: Option<String>,
    /// Embedding model identifier.
    pub model: String,
    /// Expected output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no credentials required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    /// Creates a config for an API base URL and key.
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no credentials; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Overrides the output embedding dimension.
    pub fn with_dimension(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.api_base.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "api_base is required (stubbing is disabled)".to_string(),
            });
        }

        if self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .is_none()
        {
            return Err(EmbeddingError::MissingApiKey);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingResponse {
    pub(crate) data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingRow {
    pub(crate) index: usize,
    pub(crate) embedding: Vec<f32>,
}

enum EmbedderBackend {
    Remote { http: reqwest::Client },
    Stub,
}

/// Client for an OpenAI-compatible `/embeddings` endpoint (supports stub mode).
pub struct EmbeddingClient {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for EmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingClient")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Remote { .. } => "Remote",
                    EmbedderBackend::Stub => "Stub",
                },
            )
            .field("model", &self.config.model)
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl EmbeddingClient {
    /// Builds the client from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        debug!(
            api_base = %config.api_base,
            model = %config.model,
            embedding_dim = config.embedding_dim,
            "Embedding client ready"
        );

        Ok(Self {
            backend: EmbedderBackend::Remote { http },
            config,
        })
    }

    /// Creates a stub client without touching the network.
    pub fn stub() -> Self {
        Self {
            backend: EmbedderBackend::Stub,
            config: EmbedderConfig::stub(),
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    async fn embed_remote(
        &self,
        http: &reqwest::Client,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let url = format!("{}/embeddings", self.config.api_base.trim_end_matches('/'));
        let body = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        debug!(count = texts.len(), "Requesting embeddings");

        let mut request = http.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.trim());
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EmbeddingError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse =
            resp.json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        collect_vectors(parsed, texts.len())
    }

    fn embed_stub_one(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(&mut embedding);
        embedding
    }
}

impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Remote { http } => {
                let texts = [text.to_string()];
                let mut vectors = self.embed_remote(http, &texts).await?;
                vectors
                    .pop()
                    .ok_or_else(|| EmbeddingError::MalformedResponse {
                        reason: "empty embedding response".to_string(),
                    })
            }
            EmbedderBackend::Stub => Ok(self.embed_stub_one(text)),
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EmbedderBackend::Remote { http } => self.embed_remote(http, texts).await,
            EmbedderBackend::Stub => Ok(texts.iter().map(|t| self.embed_stub_one(t)).collect()),
        }
    }
}

/// Orders response rows by index and checks the count against the request.
pub(crate) fn collect_vectors(
    response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let mut rows = response.data;

    if rows.len() != expected {
        return Err(EmbeddingError::MalformedResponse {
            reason: format!("expected {} embeddings, got {}", expected, rows.len()),
        });
    }

    rows.sort_by_key(|row| row.index);
    Ok(rows.into_iter().map(|row| row.embedding).collect())
}

fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in embedding.iter_mut() {
            *x /= norm;
        }
    }
}
