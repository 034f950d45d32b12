//! Ctrl+C handling.

use tokio::sync::broadcast;
use tracing::{error, info};

/// Sets up a shutdown signal handler
///
/// The returned receiver fires once on Ctrl+C. If the handler cannot be
/// installed the process keeps running and must be killed externally.
pub fn setup_shutdown_handler() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {e}");
            // Keep the sender alive so receivers don't see a closed channel
            std::future::pending::<()>().await;
        }

        info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed.
pub async fn shutdown_signal() {
    let mut shutdown = setup_shutdown_handler();
    let _ = shutdown.recv().await;
}
