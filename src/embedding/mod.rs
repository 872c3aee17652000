//! Clause embedding.
//!
//! Embeddings come from an OpenAI-compatible `/embeddings` endpoint. Use
//! [`EmbedderConfig::stub`] for tests/examples without credentials; the stub
//! produces deterministic unit vectors seeded from the input text.

mod client;
mod error;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use client::{EmbedderConfig, EmbeddingClient};
pub use error::EmbeddingError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

/// Source of clause embeddings required by the comparator.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single clause.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Embeds a batch of clauses, preserving input order.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;
}
