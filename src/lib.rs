//! Covenant library crate (used by the server binary and integration tests).
//!
//! Covenant checks a partner's contract terms against a bank's own clauses.
//! Both documents are segmented into clauses, every bank clause is paired
//! with its semantically closest partner clause, and an LLM judge rules on
//! each pair. Results come back as per-clause records that can be rendered
//! as JSON, CSV, or a plain-text table, streamed over SSE, or interrogated
//! in plain English through the advisor.
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Pipeline
//! - [`Segmenter`], [`SegmentMode`] - Clause segmentation
//! - [`EmbeddingClient`], [`EmbeddingProvider`] - Clause embeddings
//! - [`best_match`] - Cosine nearest-neighbour matching
//! - [`ChatJudge`], [`ClauseJudge`], [`Verdict`] - Compliance judgement
//! - [`ClauseComparator`], [`ComparisonRecord`] - End-to-end comparison
//!
//! ## Results
//! - [`AnalysisSummary`], [`ReportFormat`] - Verdict counts and rendering
//! - [`ResultsAdvisor`] - Plain-English answers about a finished run
//!
//! ## Service
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`gateway`] - Axum router, handlers, and SSE streaming
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`;
//! the stub constructors on the real components need no feature flag.

pub mod compare;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod extract;
pub mod gateway;
pub mod hashing;
pub mod judge;
pub mod matching;
pub mod qa;
pub mod report;
pub mod segment;

pub use compare::{ClauseComparator, CompareError, ComparisonRecord};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, DEFAULT_JUDGE_MODEL, DEFAULT_MAX_CHUNK_CHARS,
};
pub use embedding::{EmbedderConfig, EmbeddingClient, EmbeddingError, EmbeddingProvider};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use extract::join_pages;
pub use gateway::{
    COVENANT_STATUS_COMPLETE, COVENANT_STATUS_HEADER, COVENANT_STATUS_HEALTHY,
    COVENANT_STATUS_READY,
};
pub use hashing::{fingerprint_documents, hash_clause, hash_to_u64};
pub use judge::{ChatJudge, ClauseJudge, JudgeConfig, JudgeDecision, JudgeError, Verdict};
#[cfg(any(test, feature = "mock"))]
pub use judge::MockJudge;
pub use matching::{BestMatch, best_match, cosine_similarity};
pub use qa::{AdvisorConfig, QaError, ResultsAdvisor};
pub use report::{
    AnalysisSummary, ReportFormat, render, render_table, summarize, to_csv, to_json, to_table,
};
pub use segment::{SegmentMode, Segmenter};
