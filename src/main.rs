//! Covenant HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use covenant::compare::ClauseComparator;
use covenant::config::Config;
use covenant::embedding::{EmbedderConfig, EmbeddingClient};
use covenant::gateway::{HandlerState, create_router_with_state};
use covenant::judge::{ChatJudge, JudgeConfig};
use covenant::qa::{AdvisorConfig, ResultsAdvisor};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ██████╗ ██████╗ ██╗   ██╗███████╗███╗   ██╗ █████╗ ███╗   ██╗████████╗
██╔════╝██╔═══██╗██║   ██║██╔════╝████╗  ██║██╔══██╗████╗  ██║╚══██╔══╝
██║     ██║   ██║██║   ██║█████╗  ██╔██╗ ██║███████║██╔██╗ ██║   ██║
██║     ██║   ██║╚██╗ ██╔╝██╔══╝  ██║╚██╗██║██╔══██║██║╚██╗██║   ██║
╚██████╗╚██████╔╝ ╚████╔╝ ███████╗██║ ╚████║██║  ██║██║ ╚████║   ██║
 ╚═════╝ ╚═════╝   ╚═══╝  ╚══════╝╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝

        COMPARE. JUDGE. EXPLAIN.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Covenant starting"
    );

    let has_key = config.api_key.is_some();
    if !has_key {
        tracing::warn!("No OPENAI_API_KEY configured, running model components in stub mode");
    }

    let embedder_config = if has_key {
        EmbedderConfig {
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.embedding_model.clone(),
            embedding_dim: config.embedding_dim,
            testing_stub: false,
        }
    } else {
        EmbedderConfig::stub().with_dimension(config.embedding_dim)
    };
    let embedder = EmbeddingClient::load(embedder_config)?;
    let embedder_stub = embedder.is_stub();

    let judge_config = if has_key {
        JudgeConfig::new(config.judge_model.clone())
    } else {
        JudgeConfig::stub()
    };
    let judge = ChatJudge::load(judge_config)?;
    let judge_stub = judge.is_stub();

    let advisor_config = if has_key {
        AdvisorConfig::new(config.judge_model.clone())
    } else {
        AdvisorConfig::stub()
    };
    let advisor = Arc::new(ResultsAdvisor::load(advisor_config)?);

    let comparator = Arc::new(ClauseComparator::new(embedder, judge));

    let state = HandlerState::new(
        comparator,
        advisor,
        config.max_chunk_chars,
        embedder_stub,
        judge_stub,
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Covenant shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("COVENANT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
