use std::convert::Infallible;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, instrument};

use crate::embedding::EmbeddingProvider;
use crate::judge::ClauseJudge;
use crate::report::summarize;

use super::error::GatewayError;
use super::handler::prepare_analysis;
use super::payload::{AnalysisRequest, ChatQuery};
use super::state::HandlerState;

/// Backpressure bound between the comparison task and the SSE writer.
const SSE_CHANNEL_CAPACITY: usize = 32;

/// POST /v1/analysis/stream
///
/// Emits one `record` event per bank clause as verdicts arrive, then a
/// `summary` event and a `[DONE]` sentinel. A provider failure mid-run
/// emits an `error` event and ends the stream; records already sent
/// remain valid.
#[instrument(skip(state, request))]
pub async fn analysis_stream_handler<E, J>(
    State(state): State<HandlerState<E, J>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>, GatewayError>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    let request: AnalysisRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let prepared = prepare_analysis(request, state.max_chunk_chars)?;
    debug!(
        fingerprint = %prepared.fingerprint,
        bank = prepared.bank_clauses.len(),
        partner = prepared.partner_clauses.len(),
        "Streaming compliance analysis"
    );

    let comparator = Arc::clone(&state.comparator);
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(SSE_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let record_stream = match comparator
            .compare_stream(prepared.bank_clauses, prepared.partner_clauses)
            .await
        {
            Ok(record_stream) => record_stream,
            Err(e) => {
                error!("Comparison setup failed: {}", e);
                let _ = tx.send(Ok(error_event())).await;
                return;
            }
        };
        tokio::pin!(record_stream);

        let mut records = Vec::new();
        while let Some(item) = record_stream.next().await {
            match item {
                Ok(record) => {
                    let event = match serde_json::to_string(&record) {
                        Ok(json) => Event::default().event("record").data(json),
                        Err(e) => {
                            error!("Failed to serialize record: {}", e);
                            Event::default().comment("serialization-error")
                        }
                    };
                    records.push(record);
                    if tx.send(Ok(event)).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    error!("Comparison stream error: {}", e);
                    let _ = tx.send(Ok(error_event())).await;
                    return;
                }
            }
        }

        let summary = summarize(&records);
        match serde_json::to_string(&summary) {
            Ok(json) => {
                let _ = tx
                    .send(Ok(Event::default().event("summary").data(json)))
                    .await;
            }
            Err(e) => error!("Failed to serialize summary: {}", e),
        }
        let _ = tx.send(Ok(Event::default().data("[DONE]"))).await;
    });

    Ok(Sse::new(ReceiverStream::new(rx)))
}

/// POST /v1/analysis/chat
///
/// Streams the advisor's plain-English answer as SSE text deltas,
/// terminated by a `[DONE]` sentinel.
#[instrument(skip(state, request))]
pub async fn chat_handler<E, J>(
    State(state): State<HandlerState<E, J>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>, GatewayError>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    let request: ChatQuery = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    if request.question.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "question must not be empty".to_string(),
        ));
    }
    debug!(records = request.records.len(), "Streaming advisory answer");

    let answer_stream = state
        .advisor
        .answer_stream(&request.records, &request.question)
        .await
        .map_err(|e| GatewayError::AdvisorFailed(e.to_string()))?;

    let event_stream = answer_stream
        .map(|chunk| match chunk {
            Ok(text) => Ok(Event::default().data(text)),
            Err(e) => {
                error!("Advisor stream error: {}", e);
                Ok(error_event())
            }
        })
        .chain(stream::once(async {
            Ok(Event::default().data("[DONE]"))
        }));

    Ok(Sse::new(event_stream))
}

fn error_event() -> Event {
    Event::default()
        .event("error")
        .data("Stream interrupted by upstream error")
}
