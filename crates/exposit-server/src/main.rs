//! exposit server
//!
//! Serves a process-owned metric registry over HTTP.
//! - `GET /metrics` (configurable): text exposition
//! - `GET /healthz`: liveness
//!
//! Usage: `exposit-server [config.yaml]`

use std::process::ExitCode;
use std::sync::Arc;

use exposit_core::error::{ExpositError, Result};
use exposit_core::Registry;
use exposit_server::{app_state::AppState, config, obs, router};

#[tokio::main]
async fn main() -> ExitCode {
    let arg = std::env::args().nth(1);
    let cfg = match config::resolve(arg.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("exposit-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = obs::logging::init(&cfg.logging) {
        eprintln!("exposit-server: {e}");
        return ExitCode::FAILURE;
    }

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "exposit-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: config::ServerConfig) -> Result<()> {
    let listen = cfg.server.listen_addr()?;
    let metrics_path = cfg.server.metrics_path.clone();

    let registry = Arc::new(Registry::new());
    let state = AppState::new(cfg, registry)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExpositError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, path = %metrics_path, "exposit-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExpositError::Internal(format!("server failed: {e}")))?;

    tracing::info!("exposit-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
