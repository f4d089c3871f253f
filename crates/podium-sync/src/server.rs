//! Sync server lifecycle: bind, serve, graceful shutdown.
//!
//! Binding is separated from serving so a port failure is detected (and
//! reported once) before any background task exists -- the timer and
//! local displays keep working without the endpoint. Shutdown is
//! cooperative: once the signal fires the server stops accepting new
//! connections and the listener is released when the serve future
//! completes.

use std::net::SocketAddr;

use podium_core::SharedStateStore;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::router::build_router;

/// Network configuration for the sync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
        }
    }
}

/// Errors that can occur when starting or running the sync server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address. Fatal only to the sync
    /// capability; the endpoint stays unavailable for the session.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Bind the listener for the configured address.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is invalid or the port
/// cannot be bound.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))
}

/// Serve sync requests on the given listener until the shutdown signal
/// fires (or its sender is dropped).
///
/// When this returns, the listener has been dropped and the port is
/// free again.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] if the server encounters a fatal I/O
/// error.
pub async fn serve(
    listener: TcpListener,
    store: SharedStateStore,
    mut shutdown: watch::Receiver<()>,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "sync server listening");
    }

    let router = build_router(store);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            // Resolves on the first signal or when the sender is dropped;
            // either way the server stops accepting connections.
            let _ = shutdown.changed().await;
        })
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("sync server stopped, port released");
    Ok(())
}
