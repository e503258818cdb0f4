//! API server lifecycle: bind, serve, shut down on ctrl-c.

use std::net::SocketAddr;

use crate::api::router::api_router;
use crate::api::types::ApiContext;
use crate::config::ConfigError;
use crate::formulary::FormularyError;

/// Errors that stop the service from coming up.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Formulary error: {0}")]
    Formulary(#[from] FormularyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve the API until a shutdown signal arrives.
pub async fn serve(ctx: ApiContext, addr: SocketAddr) -> Result<(), ServeError> {
    let app = api_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "LatiMed API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("LatiMed API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Cannot listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
