//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// API base URL resolved to an empty string.
    #[error("api base url must not be empty")]
    EmptyApiBase,

    /// Embedding dimension must be positive.
    #[error("invalid embedding dimension {value}: must be positive")]
    InvalidEmbeddingDim { value: usize },

    /// Fixed-size chunking budget must be positive.
    #[error("invalid max chunk chars {value}: must be positive")]
    InvalidMaxChunkChars { value: usize },

    /// A required environment variable was not set.
    ///
    /// Not raised by the current loading path, which falls back to defaults for
    /// every optional setting. Kept for stricter configuration policies and for
    /// downstream consumers that want to require certain variables in their own
    /// validation logic.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
