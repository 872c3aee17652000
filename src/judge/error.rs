use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("invalid judge configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("judge request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("judge returned an empty response")]
    EmptyResponse,
}
