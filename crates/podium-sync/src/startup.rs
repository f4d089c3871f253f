//! Background-task spawner for the sync server.
//!
//! [`spawn_sync`] binds eagerly, then launches the server on its own
//! Tokio task so it runs concurrently with (and fully decoupled from)
//! the scheduler task. The returned [`SyncHandle`] performs the
//! cooperative shutdown with a bounded join timeout.

use std::net::SocketAddr;
use std::time::Duration;

use podium_core::SharedStateStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::server::{self, ServerConfig, ServerError};

/// Handle to a running sync server task.
#[derive(Debug)]
pub struct SyncHandle {
    shutdown: watch::Sender<()>,
    task: JoinHandle<()>,
    local_addr: Option<SocketAddr>,
}

impl SyncHandle {
    /// The address the server actually bound to.
    pub const fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Signal the server to stop accepting connections and wait for it
    /// to terminate, at most `timeout`.
    ///
    /// A completed join guarantees the port has been released. A
    /// timeout is logged as a warning and teardown proceeds regardless;
    /// process exit reclaims the task.
    pub async fn shutdown(self, timeout: Duration) {
        let _ = self.shutdown.send(());
        match tokio::time::timeout(timeout, self.task).await {
            Ok(Ok(())) => info!("sync server shut down cleanly"),
            Ok(Err(e)) => warn!(error = %e, "sync server task ended abnormally"),
            Err(_elapsed) => warn!(
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "sync server did not shut down within the timeout; proceeding with teardown"
            ),
        }
    }
}

/// Spawn the sync server on a background Tokio task.
///
/// The listener is bound before the task is spawned, so a port failure
/// is reported here, exactly once, and no task is left behind.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the configured address cannot be
/// bound. The caller should treat this as the loss of the sync
/// capability only -- the timer keeps running without it.
pub async fn spawn_sync(
    config: &ServerConfig,
    store: SharedStateStore,
) -> Result<SyncHandle, ServerError> {
    let listener = server::bind(config).await?;
    let local_addr = listener.local_addr().ok();

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let task = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, store, shutdown_rx).await {
            error!(error = %e, "sync server exited with error");
        }
    });

    info!(addr = ?local_addr, "sync server spawned on background task");

    Ok(SyncHandle {
        shutdown: shutdown_tx,
        task,
        local_addr,
    })
}
