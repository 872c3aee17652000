use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::judge::JudgeError;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("compliance judgement failed: {0}")]
    Judgement(#[from] JudgeError),
}
