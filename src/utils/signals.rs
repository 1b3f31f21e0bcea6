//! Signal handling for shutdown and remote pause toggling

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1};
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Stream that yields once per SIGUSR1, used to toggle pause from outside
pub fn pause_toggle_signals() -> std::io::Result<Signals> {
    Signals::new([SIGUSR1])
}
