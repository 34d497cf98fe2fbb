//! rr-server: HTTP surface for browsing and streaming a media library.
//!
//! This crate ties the sandbox and tree builder from `rr-library` to an
//! Axum router. It provides:
//!
//! - Directory listings and a video player page rendered as HTML
//! - `GET /stream/{path}` with single-range `Range` support
//! - A JSON view of the directory tree
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod render;
pub mod router;
pub mod routes;
pub mod streaming;

use std::net::SocketAddr;

use rr_core::config::Config;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the reelroom server.
///
/// Builds the [`AppContext`] from `config`, binds the listener, and serves
/// until a shutdown signal is received or `cancel` is triggered.
pub async fn start(config: Config, cancel: CancellationToken) -> rr_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let ctx = AppContext::from_config(&config)?;
    tracing::info!(
        "Serving library at {} ({} extensions allowed)",
        ctx.sandbox.root().display(),
        ctx.extensions.iter().count()
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| rr_core::Error::Validation(format!("Invalid server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| rr_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let app = router::build_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
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
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
