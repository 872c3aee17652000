//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `COVENANT_*` environment variables;
//! provider credentials come from the standard `OPENAI_API_KEY`.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, DEFAULT_JUDGE_MODEL,
    DEFAULT_MAX_CHUNK_CHARS,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `COVENANT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the OpenAI-compatible API. Default: `https://api.openai.com/v1`.
    pub api_base: String,

    /// Provider API key. When absent the embedder and judge run in stub mode.
    pub api_key: Option<String>,

    /// Model requested from the embeddings endpoint.
    pub embedding_model: String,

    /// Dimension of the embedding vectors. Default: `1536`.
    pub embedding_dim: usize,

    /// Chat model used for compliance judgment.
    pub judge_model: String,

    /// Character budget for fixed-size segmentation. Default: `2000`.
    pub max_chunk_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            judge_model: DEFAULT_JUDGE_MODEL.to_string(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "COVENANT_PORT";
    const ENV_BIND_ADDR: &'static str = "COVENANT_BIND_ADDR";
    const ENV_API_BASE: &'static str = "COVENANT_API_BASE";
    const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "COVENANT_EMBEDDING_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "COVENANT_EMBEDDING_DIM";
    const ENV_JUDGE_MODEL: &'static str = "COVENANT_JUDGE_MODEL";
    const ENV_MAX_CHUNK_CHARS: &'static str = "COVENANT_MAX_CHUNK_CHARS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let api_base = Self::parse_string_from_env(Self::ENV_API_BASE, defaults.api_base);
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);
        let judge_model = Self::parse_string_from_env(Self::ENV_JUDGE_MODEL, defaults.judge_model);
        let max_chunk_chars =
            Self::parse_usize_from_env(Self::ENV_MAX_CHUNK_CHARS, defaults.max_chunk_chars);

        Ok(Self {
            port,
            bind_addr,
            api_base,
            api_key,
            embedding_model,
            embedding_dim,
            judge_model,
            max_chunk_chars,
        })
    }

    /// Validates cross-field invariants that env parsing alone cannot catch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::EmptyApiBase);
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidEmbeddingDim {
                value: self.embedding_dim,
            });
        }

        if self.max_chunk_chars == 0 {
            return Err(ConfigError::InvalidMaxChunkChars {
                value: self.max_chunk_chars,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
