use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding API key missing; set OPENAI_API_KEY or enable the stub")]
    MissingApiKey,

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding endpoint returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::RequestFailed {
            reason: err.to_string(),
        }
    }
}
