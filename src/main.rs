//! Log Tail - A read-only log query server
//!
//! Serves the newest, optionally filtered lines of log files over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use log_tail::api::create_router;
use log_tail::executor::TimeoutExecutor;
use log_tail::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the log server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the log service and its response cache
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "log_tail=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Log Tail Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: log_dir={}, port={}, cache_max_entries={}, cache_ttl={}s, request_timeout={}ms, chunk_size={}",
        config.log_dir.display(),
        config.server_port,
        config.cache_max_entries,
        config.cache_ttl,
        config.request_timeout_ms,
        config.chunk_size
    );

    let state = AppState::from_config(&config);
    let executor = state.service.executor().clone();
    info!("Log service initialized");

    // The sweep runs once per TTL period
    let cleanup_interval = config.cache_ttl_duration().max(Duration::from_secs(1));
    let cleanup_handle = spawn_cleanup_task(state.cache(), cleanup_interval);
    info!("Background cache cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle, executor))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and cancels in-flight scans.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>, executor: TimeoutExecutor) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    executor.shutdown();
    warn!("Cleanup task aborted, in-flight scans cancelled");
}
