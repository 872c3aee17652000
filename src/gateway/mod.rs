//! HTTP gateway exposing the compliance pipeline.
//!
//! Routes:
//! - `GET /healthz` liveness probe
//! - `GET /ready` readiness probe with component modes
//! - `POST /v1/analysis` full run, one JSON body
//! - `POST /v1/analysis/stream` per-record SSE
//! - `POST /v1/analysis/export` render records as JSON, CSV, or a table
//! - `POST /v1/analysis/chat` plain-English Q&A over finished records

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;
pub mod streaming;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::embedding::EmbeddingProvider;
use crate::judge::ClauseJudge;

pub use error::GatewayError;
pub use payload::{AnalysisRequest, AnalysisResponse, ChatQuery, DocumentInput, ExportRequest};
pub use state::HandlerState;

/// Response header carrying the request's processing status.
pub const COVENANT_STATUS_HEADER: &str = "X-Covenant-Status";

/// Status header value for liveness responses.
pub const COVENANT_STATUS_HEALTHY: &str = "healthy";

/// Status header value for readiness responses.
pub const COVENANT_STATUS_READY: &str = "ready";

/// Status header value for completed analysis work.
pub const COVENANT_STATUS_COMPLETE: &str = "complete";

/// Builds the service router with all routes and middleware attached.
pub fn create_router_with_state<E, J>(state: HandlerState<E, J>) -> Router
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/analysis", post(handler::analysis_handler))
        .route(
            "/v1/analysis/stream",
            post(streaming::analysis_stream_handler),
        )
        .route("/v1/analysis/export", post(handler::export_handler))
        .route("/v1/analysis/chat", post(streaming::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /healthz
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        COVENANT_STATUS_HEADER,
        HeaderValue::from_static(COVENANT_STATUS_HEALTHY),
    );
    (
        StatusCode::OK,
        headers,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response()
}

/// Component modes reported by the readiness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub embedder: String,
    pub judge: String,
    pub advisor: String,
}

/// Readiness payload for `GET /ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

fn component_mode(stub: bool) -> &'static str {
    if stub { "stub" } else { "live" }
}

/// GET /ready
///
/// Reports whether each model-backed component is talking to a live
/// provider or running as a stub.
pub async fn ready_handler<E, J>(State(state): State<HandlerState<E, J>>) -> Response
where
    E: EmbeddingProvider + Send + Sync + 'static,
    J: ClauseJudge + Send + Sync + 'static,
{
    let response = ReadyResponse {
        status: "ok".to_string(),
        components: ComponentStatus {
            embedder: component_mode(state.embedder_stub).to_string(),
            judge: component_mode(state.judge_stub).to_string(),
            advisor: component_mode(state.advisor.is_stub()).to_string(),
        },
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        COVENANT_STATUS_HEADER,
        HeaderValue::from_static(COVENANT_STATUS_READY),
    );
    (StatusCode::OK, headers, Json(response)).into_response()
}
