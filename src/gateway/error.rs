use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::compare::CompareError;

use super::COVENANT_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("judgement failed: {0}")]
    JudgementFailed(String),

    #[error("advisor failed: {0}")]
    AdvisorFailed(String),

    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<CompareError> for GatewayError {
    fn from(e: CompareError) -> Self {
        match e {
            CompareError::Embedding(inner) => GatewayError::EmbeddingFailed(inner.to_string()),
            CompareError::Judgement(inner) => GatewayError::JudgementFailed(inner.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::EmbeddingFailed(_) => (StatusCode::BAD_GATEWAY, "embedding_error"),
            GatewayError::JudgementFailed(_) => (StatusCode::BAD_GATEWAY, "judgement_error"),
            GatewayError::AdvisorFailed(_) => (StatusCode::BAD_GATEWAY, "advisor_error"),
            GatewayError::SerializationFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "serialization_error",
            ),
            GatewayError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(COVENANT_STATUS_HEADER, HeaderValue::from_static(kind));

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                kind,
            },
        });

        (status, headers, body).into_response()
    }
}
