//! Screams Server: social feed backend.
//!
//! Main entry point that loads configuration, wires all crates together and
//! starts the HTTP server alongside the trigger runner.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use screams_api::Application;
use screams_core::config::AppConfig;
use screams_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("SCREAMS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Screams v{}", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let shutdown_grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    // ── Step 1: Store, services, triggers ────────────────────────
    tracing::info!(provider = %config.store.provider, "Building application...");
    let app = Application::build(config).await?;

    // ── Step 2: Shutdown channel & trigger runner ────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let runner_handle = app.runner().map(|runner| {
        let runner = Arc::clone(runner);
        let cancel = shutdown_rx.clone();
        tokio::spawn(async move { runner.run(cancel).await })
    });

    // ── Step 3: HTTP server ──────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Screams server listening on {}", addr);

    let served = axum::serve(listener, app.router())
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await;

    // Requests have finished; their events are queued and the runner
    // flushes them before stopping.
    let _ = shutdown_tx.send(true);
    served.map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Wait for the trigger runner ──────────────────────
    if let Some(handle) = runner_handle {
        if tokio::time::timeout(shutdown_grace, handle).await.is_err() {
            tracing::warn!("Trigger runner did not stop within the grace period");
        }
    }

    tracing::info!("Screams server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
