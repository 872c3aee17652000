use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::EmbeddingProvider;
use super::client::EmbeddingClient;
use super::error::EmbeddingError;

#[derive(Clone)]
/// In-memory mock embedder that records every request.
///
/// Vectors come from the deterministic stub generator, so two mocks
/// always agree on the embedding of a given text.
pub struct MockEmbedder {
    inner: Arc<EmbeddingClient>,
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbedder {
    /// Creates a mock with the default embedding dimension.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EmbeddingClient::stub()),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a mock producing vectors of `embedding_dim` components.
    pub fn with_dimension(embedding_dim: usize) -> Self {
        let client = EmbeddingClient::load(
            super::EmbedderConfig::stub().with_dimension(embedding_dim),
        )
        .unwrap_or_else(|_| EmbeddingClient::stub());

        Self {
            inner: Arc::new(client),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns every text embedded so far, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Returns the number of texts embedded so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Makes every subsequent request fail (or succeed again) for testing
    /// error handling paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> Result<(), EmbeddingError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                reason: "mock embedder failure".to_string(),
            });
        }
        Ok(())
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());
        self.check_failing()?;
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.lock().extend(texts.iter().cloned());
        self.check_failing()?;
        self.inner.embed_batch(texts).await
    }
}
