use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::embedding::EmbeddingProvider;
use crate::hashing::fingerprint_documents;
use crate::judge::ClauseJudge;
use crate::report::{render, summarize};
use crate::segment::{SegmentMode, Segmenter};

use super::error::GatewayError;
use super::payload::{AnalysisRequest, AnalysisResponse, ExportRequest};
use super::state::HandlerState;
use super::{COVENANT_STATUS_COMPLETE, COVENANT_STATUS_HEADER};

/// Segmented documents ready for comparison.
pub(crate) struct PreparedAnalysis {
    pub mode: SegmentMode,
    pub fingerprint: String,
    pub bank_clauses: Vec<String>,
    pub partner_clauses: Vec<String>,
}

/// Validates the request and segments both documents.
///
/// Rejects empty documents and a zero chunk ceiling up front so both the
/// blocking and streaming endpoints fail with a 400 before any provider
/// call is made.
pub(crate) fn prepare_analysis(
    request: AnalysisRequest,
    default_max_chars: usize,
) -> Result<PreparedAnalysis, GatewayError> {
    let bank_text = request.bank.into_text();
    let partner_text = request.partner.into_text();

    if bank_text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "bank document is empty".to_string(),
        ));
    }
    if partner_text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "partner document is empty".to_string(),
        ));
    }

    let max_chars = request.max_chars.unwrap_or(default_max_chars);
    if max_chars == 0 {
        return Err(GatewayError::InvalidRequest(
            "max_chars must be positive".to_string(),
        ));
    }

    let fingerprint = format!("{:016x}", fingerprint_documents(&bank_text, &partner_text));

    let segmenter = Segmenter::new(request.mode, max_chars);
    let bank_clauses = segmenter.segment(&bank_text);
    let partner_clauses = segmenter.segment(&partner_text);

    Ok(PreparedAnalysis {
        mode: request.mode,
        fingerprint,
        bank_clauses,
        partner_clauses,
    })
}

/// Builds a JSON response with the status header set.
pub(crate) fn make_response<T: serde::Serialize>(payload: &T, status: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(COVENANT_STATUS_HEADER, HeaderValue::from_static(status));
    (StatusCode::OK, headers, Json(payload)).into_response()
}

/// POST /v1/analysis
///
/// Runs the full pipeline over both documents and returns every record
/// plus the verdict summary in one body.
#[instrument(skip(state, request), fields(mode = tracing::field::Empty, bank_clauses = tracing::field::Empty))]
pub async fn analysis_handler<E, J>(
    State(state): State<HandlerState<E, J>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    let request: AnalysisRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let prepared = prepare_analysis(request, state.max_chunk_chars)?;
    tracing::Span::current().record("mode", tracing::field::display(prepared.mode));
    tracing::Span::current().record("bank_clauses", prepared.bank_clauses.len());

    debug!(
        fingerprint = %prepared.fingerprint,
        bank = prepared.bank_clauses.len(),
        partner = prepared.partner_clauses.len(),
        "Starting compliance analysis"
    );

    let bank_count = prepared.bank_clauses.len();
    let partner_count = prepared.partner_clauses.len();

    let records = state
        .comparator
        .compare(prepared.bank_clauses, prepared.partner_clauses)
        .await?;

    let summary = summarize(&records);
    info!(
        fingerprint = %prepared.fingerprint,
        total = summary.total,
        compliant = summary.compliant,
        non_compliant = summary.non_compliant,
        missing = summary.missing,
        "Analysis complete"
    );

    let response = AnalysisResponse {
        run_id: uuid::Uuid::new_v4().to_string(),
        fingerprint: prepared.fingerprint,
        generated_at: chrono::Utc::now(),
        mode: prepared.mode,
        bank_clauses: bank_count,
        partner_clauses: partner_count,
        records,
        summary,
    };

    Ok(make_response(&response, COVENANT_STATUS_COMPLETE))
}

/// POST /v1/analysis/export
///
/// Renders previously computed records in the requested format. No model
/// calls are made; the body is served with the format's content type.
#[instrument(skip(request), fields(format = tracing::field::Empty))]
pub async fn export_handler(
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ExportRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    tracing::Span::current().record("format", tracing::field::debug(request.format));

    let body = render(&request.records, request.format)
        .map_err(|e| GatewayError::SerializationFailed(e.to_string()))?;

    debug!(records = request.records.len(), "Rendered export");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(request.format.content_type()),
    );
    headers.insert(
        COVENANT_STATUS_HEADER,
        HeaderValue::from_static(COVENANT_STATUS_COMPLETE),
    );

    Ok((StatusCode::OK, headers, body).into_response())
}
