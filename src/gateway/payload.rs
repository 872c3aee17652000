use serde::{Deserialize, Serialize};

use crate::compare::ComparisonRecord;
use crate::extract::join_pages;
use crate::report::{AnalysisSummary, ReportFormat};
use crate::segment::SegmentMode;

/// A contract document supplied either as raw text or as extracted pages.
///
/// Page entries may be `null` when extraction produced nothing for that
/// page; they contribute an empty slot so pagination is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentInput {
    Pages { pages: Vec<Option<String>> },
    Text { text: String },
}

impl DocumentInput {
    /// Flattens the input to a single text blob.
    pub fn into_text(self) -> String {
        match self {
            DocumentInput::Pages { pages } => join_pages(pages),
            DocumentInput::Text { text } => text,
        }
    }
}

/// Body of `POST /v1/analysis` and `POST /v1/analysis/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The bank's own terms, the reference side of the comparison.
    pub bank: DocumentInput,
    /// The partner document checked against the bank's terms.
    pub partner: DocumentInput,
    /// Segmentation strategy, `clause` unless stated.
    #[serde(default)]
    pub mode: SegmentMode,
    /// Per-chunk ceiling for size-mode segmentation.
    #[serde(default)]
    pub max_chars: Option<usize>,
}

/// Body of `POST /v1/analysis` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub run_id: String,
    pub fingerprint: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub mode: SegmentMode,
    pub bank_clauses: usize,
    pub partner_clauses: usize,
    pub records: Vec<ComparisonRecord>,
    pub summary: AnalysisSummary,
}

/// Body of `POST /v1/analysis/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub records: Vec<ComparisonRecord>,
    #[serde(default)]
    pub format: ReportFormat,
}

/// Body of `POST /v1/analysis/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub records: Vec<ComparisonRecord>,
    pub question: String,
}
