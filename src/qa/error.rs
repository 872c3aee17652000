use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("invalid advisor configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("advisor request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("advisor returned an empty response")]
    EmptyResponse,

    #[error("failed to encode analysis context: {0}")]
    ContextEncoding(#[from] serde_json::Error),
}
