use std::sync::Arc;

use crate::compare::ClauseComparator;
use crate::embedding::EmbeddingProvider;
use crate::judge::ClauseJudge;
use crate::qa::ResultsAdvisor;

/// Shared state handed to every request handler.
pub struct HandlerState<E, J>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    /// Comparison pipeline: embed, match, judge.
    pub comparator: Arc<ClauseComparator<E, J>>,
    /// Plain-English advisor over finished runs.
    pub advisor: Arc<ResultsAdvisor>,
    /// Default chunk ceiling for size-mode segmentation.
    pub max_chunk_chars: usize,
    /// True when the embedder was loaded without credentials.
    pub embedder_stub: bool,
    /// True when the judge was loaded without credentials.
    pub judge_stub: bool,
}

impl<E, J> HandlerState<E, J>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    pub fn new(
        comparator: Arc<ClauseComparator<E, J>>,
        advisor: Arc<ResultsAdvisor>,
        max_chunk_chars: usize,
        embedder_stub: bool,
        judge_stub: bool,
    ) -> Self {
        Self {
            comparator,
            advisor,
            max_chunk_chars,
            embedder_stub,
            judge_stub,
        }
    }
}

// Derived Clone would demand E: Clone and J: Clone; the Arcs are enough.
impl<E, J> Clone for HandlerState<E, J>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            comparator: Arc::clone(&self.comparator),
            advisor: Arc::clone(&self.advisor),
            max_chunk_chars: self.max_chunk_chars,
            embedder_stub: self.embedder_stub,
            judge_stub: self.judge_stub,
        }
    }
}
