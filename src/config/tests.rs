use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_covenant_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("COVENANT_PORT");
        env::remove_var("COVENANT_BIND_ADDR");
        env::remove_var("COVENANT_API_BASE");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("COVENANT_EMBEDDING_MODEL");
        env::remove_var("COVENANT_EMBEDDING_DIM");
        env::remove_var("COVENANT_JUDGE_MODEL");
        env::remove_var("COVENANT_MAX_CHUNK_CHARS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.api_base, "https://api.openai.com/v1");
    assert!(config.api_key.is_none());
    assert_eq!(config.embedding_model, "text-embedding-ada-002");
    assert_eq!(config.embedding_dim, 1536);
    assert_eq!(config.judge_model, "gpt-3.5-turbo");
    assert_eq!(config.max_chunk_chars, 2000);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_covenant_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_custom_bind_addr() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_BIND_ADDR", "0.0.0.0")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
        );
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_custom_models() {
    clear_covenant_env();

    with_env_vars(
        &[
            ("COVENANT_EMBEDDING_MODEL", "text-embedding-3-small"),
            ("COVENANT_JUDGE_MODEL", "gpt-4o-mini"),
            ("COVENANT_API_BASE", "http://localhost:11434/v1"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.embedding_model, "text-embedding-3-small");
            assert_eq!(config.judge_model, "gpt-4o-mini");
            assert_eq!(config.api_base, "http://localhost:11434/v1");
        },
    );
}

#[test]
#[serial]
fn test_from_env_api_key_present() {
    clear_covenant_env();

    with_env_vars(&[("OPENAI_API_KEY", "sk-test-123")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.api_key.as_deref(), Some("sk-test-123"));
    });
}

#[test]
#[serial]
fn test_from_env_blank_api_key_is_none() {
    clear_covenant_env();

    with_env_vars(&[("OPENAI_API_KEY", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.api_key.is_none());
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_PORT", "0")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_PORT", "not_a_port")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("failed to parse port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_too_large() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_PORT", "99999")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_BIND_ADDR", "not.an.ip.address")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
        assert!(err.to_string().contains("failed to parse bind address"));
    });
}

#[test]
#[serial]
fn test_from_env_custom_max_chunk_chars() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_MAX_CHUNK_CHARS", "500")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.max_chunk_chars, 500);
    });
}

#[test]
#[serial]
fn test_from_env_invalid_max_chunk_chars_uses_default() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_MAX_CHUNK_CHARS", "not_a_number")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.max_chunk_chars, 2000);
    });
}

#[test]
#[serial]
fn test_from_env_invalid_embedding_dim_uses_default() {
    clear_covenant_env();

    with_env_vars(&[("COVENANT_EMBEDDING_DIM", "wide")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.embedding_dim, 1536);
    });
}

#[test]
fn test_validate_zero_max_chunk_chars() {
    let config = Config {
        max_chunk_chars: 0,
        ..Default::default()
    };

    let result = config.validate();
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMaxChunkChars { .. }));
}

#[test]
fn test_validate_zero_embedding_dim() {
    let config = Config {
        embedding_dim: 0,
        ..Default::default()
    };

    let result = config.validate();
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEmbeddingDim { .. }));
}

#[test]
fn test_validate_empty_api_base() {
    let config = Config {
        api_base: "  ".to_string(),
        ..Default::default()
    };

    let result = config.validate();
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::EmptyApiBase));
}

#[test]
fn test_validate_success_with_defaults() {
    let config = Config::default();

    let result = config.validate();
    assert!(
        result.is_ok(),
        "validate() should succeed with default config"
    );
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_covenant_env();

    with_env_vars(
        &[
            ("COVENANT_PORT", "8080"),
            ("COVENANT_BIND_ADDR", "0.0.0.0"),
            ("COVENANT_API_BASE", "https://gateway.internal/v1"),
            ("OPENAI_API_KEY", "sk-live-456"),
            ("COVENANT_EMBEDDING_MODEL", "text-embedding-3-large"),
            ("COVENANT_EMBEDDING_DIM", "3072"),
            ("COVENANT_JUDGE_MODEL", "gpt-4o"),
            ("COVENANT_MAX_CHUNK_CHARS", "1200"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.port, 8080);
            assert_eq!(
                config.bind_addr,
                IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
            );
            assert_eq!(config.api_base, "https://gateway.internal/v1");
            assert_eq!(config.api_key.as_deref(), Some("sk-live-456"));
            assert_eq!(config.embedding_model, "text-embedding-3-large");
            assert_eq!(config.embedding_dim, 3072);
            assert_eq!(config.judge_model, "gpt-4o");
            assert_eq!(config.max_chunk_chars, 1200);
            assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        },
    );
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("invalid port"));
    assert!(err.to_string().contains("0"));
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::InvalidMaxChunkChars { value: 0 };
    assert!(err.to_string().contains("max chunk chars"));

    let err = ConfigError::MissingEnvVar {
        name: "COVENANT_JUDGE_MODEL",
    };
    assert!(err.to_string().contains("COVENANT_JUDGE_MODEL"));
}
