//! Server lifecycle
//!
//! Binds the HTTP listener and serves until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use vimeo_addon_core::Addon;

use crate::http::create_router;

/// Serve the addon on `address` until a shutdown signal arrives
pub async fn serve(address: &str, addon: Arc<dyn Addon>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener on {address}: {e}"))?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(addon))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C signal");
            }
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received SIGTERM signal");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, starting graceful shutdown...");
}
