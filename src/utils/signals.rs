//! Signal handling for graceful shutdown

use tracing::{info, warn};

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// If no handler can be installed this never resolves; the overlay can still
/// be closed through its exit action.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use futures::stream::StreamExt;
    use signal_hook_tokio::Signals;

    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to install signal handler: {}", e);
            return futures::future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C"),
        Err(e) => {
            warn!("Failed to install Ctrl-C handler: {}", e);
            futures::future::pending::<()>().await;
        }
    }
}
