//! Clause-by-clause document comparison.
//!
//! [`ClauseComparator`] pairs an embedding provider with a compliance judge.
//! Each run embeds the partner document's clauses once, then walks the bank
//! clauses in order: embed the clause, pick the closest partner clause by
//! cosine similarity, and ask the judge for a verdict. Bank clauses with no
//! usable match get a `missing` verdict without a judge call.

mod error;


pub use error::CompareError;

use futures_util::{Stream, TryStreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::MISSING_CLAUSE_EXPLANATION;
use crate::embedding::EmbeddingProvider;
use crate::judge::{ClauseJudge, Verdict};
use crate::matching::best_match;

/// One row of an analysis: a bank clause, its closest partner clause (if
/// any), and the judged verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// The bank clause under review.
    pub bank_clause: String,
    /// Closest partner clause, or `None` when nothing matched.
    pub partner_clause: Option<String>,
    /// Compliance verdict.
    pub compliance: Verdict,
    /// Brief reason for the verdict.
    pub explanation: String,
}

/// Cross-document clause comparator.
pub struct ClauseComparator<E, J> {
    embedder: E,
    judge: J,
}

impl<E: std::fmt::Debug, J: std::fmt::Debug> std::fmt::Debug for ClauseComparator<E, J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClauseComparator")
            .field("embedder", &self.embedder)
            .field("judge", &self.judge)
            .finish()
    }
}

impl<E, J> ClauseComparator<E, J>
where
    E: EmbeddingProvider,
    J: ClauseJudge,
{
    /// Creates a comparator from an embedding provider and a judge.
    pub fn new(embedder: E, judge: J) -> Self {
        Self { embedder, judge }
    }

    /// Returns the embedding provider.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns the compliance judge.
    pub fn judge(&self) -> &J {
        &self.judge
    }

    /// Compares both documents, yielding one record per bank clause as soon
    /// as it is judged.
    ///
    /// Partner clauses are embedded once before the first record. An
    /// embedding failure there surfaces as the outer `Err`; later per-clause
    /// failures end the stream with an `Err` item.
    pub async fn compare_stream(
        &self,
        bank_clauses: Vec<String>,
        partner_clauses: Vec<String>,
    ) -> Result<
        impl Stream<Item = Result<ComparisonRecord, CompareError>> + Send + '_,
        CompareError,
    > {
        info!(
            bank_clauses = bank_clauses.len(),
            partner_clauses = partner_clauses.len(),
            "Starting clause comparison"
        );

        let partner_embeddings = self.embedder.embed_batch(&partner_clauses).await?;

        Ok(stream::unfold(
            (
                self,
                partner_clauses,
                partner_embeddings,
                bank_clauses.into_iter(),
            ),
            |(comparator, clauses, embeddings, mut remaining)| async move {
                let bank_clause = remaining.next()?;
                let record = comparator
                    .compare_one(bank_clause, &clauses, &embeddings)
                    .await;
                Some((record, (comparator, clauses, embeddings, remaining)))
            },
        ))
    }

    /// Compares both documents and collects every record.
    ///
    /// Records come back in bank-clause order, exactly one per bank clause.
    pub async fn compare(
        &self,
        bank_clauses: Vec<String>,
        partner_clauses: Vec<String>,
    ) -> Result<Vec<ComparisonRecord>, CompareError> {
        let stream = self.compare_stream(bank_clauses, partner_clauses).await?;
        stream.try_collect().await
    }

    async fn compare_one(
        &self,
        bank_clause: String,
        partner_clauses: &[String],
        partner_embeddings: &[Vec<f32>],
    ) -> Result<ComparisonRecord, CompareError> {
        let query = self.embedder.embed(&bank_clause).await?;
        let matched = best_match(&query, partner_embeddings)
            .map(|found| partner_clauses[found.index].clone());

        match matched.as_deref() {
            Some(partner_clause) if !partner_clause.is_empty() => {
                let decision = self.judge.judge(&bank_clause, partner_clause).await?;

                debug!(
                    verdict = %decision.compliance,
                    bank_len = bank_clause.len(),
                    partner_len = partner_clause.len(),
                    "Judged clause pair"
                );

                Ok(ComparisonRecord {
                    bank_clause,
                    partner_clause: matched,
                    compliance: decision.compliance,
                    explanation: decision.explanation,
                })
            }
            _ => {
                debug!(bank_len = bank_clause.len(), "No partner clause matched");

                Ok(ComparisonRecord {
                    bank_clause,
                    partner_clause: matched,
                    compliance: Verdict::Missing,
                    explanation: MISSING_CLAUSE_EXPLANATION.to_string(),
                })
            }
        }
    }
}
