//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary values from these at the use site to avoid drift.

/// Dimension of the vectors produced by the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Default model requested from the embeddings endpoint.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Default chat model used for compliance judgment.
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default upper bound for a fixed-size chunk, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 2000;

/// Separator budget charged when a paragraph joins an existing chunk.
pub const PARAGRAPH_SEPARATOR_LEN: usize = 2;

/// Token ceiling for a single judge reply.
pub const JUDGE_MAX_TOKENS: u32 = 256;

/// Token ceiling for a single advisory answer or explanation.
pub const ADVISOR_MAX_TOKENS: u32 = 256;

/// Explanation attached to records synthesized without any partner candidate.
pub const MISSING_CLAUSE_EXPLANATION: &str = "No matching clause found.";
