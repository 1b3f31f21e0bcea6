//! App blocker background task

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info};

use crate::services::kill_apps;

/// How often blocked apps are killed again
pub const BLOCK_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to a running blocker. Pausing and stopping are level signals, so
/// repeating either is harmless.
#[derive(Debug)]
pub struct AppBlocker {
    paused_tx: watch::Sender<bool>,
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AppBlocker {
    /// Spawn the blocker on the current tokio runtime
    pub fn spawn(apps: Vec<String>) -> Self {
        let (paused_tx, paused_rx) = watch::channel(false);
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(app_blocker_task(apps, paused_rx, stop_rx));
        Self {
            paused_tx,
            stop_tx,
            handle,
        }
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused_tx.send_replace(paused);
    }

    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.handle.await;
    }
}

/// Kill `apps` right away, then again every [`BLOCK_INTERVAL`] while not paused
pub async fn app_blocker_task(
    apps: Vec<String>,
    paused: watch::Receiver<bool>,
    mut stop: watch::Receiver<bool>,
) {
    info!("Starting app blocker for {:?}", apps);

    let mut interval = tokio::time::interval(BLOCK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *stop.borrow() {
            break;
        }
        tokio::select! {
            // The first tick completes immediately
            _ = interval.tick() => {
                if *paused.borrow() {
                    debug!("App blocker paused, skipping sweep");
                } else {
                    kill_apps(&apps).await;
                }
            }
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("App blocker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_is_idempotent() {
        let blocker = AppBlocker::spawn(Vec::new());
        blocker.set_paused(true);
        blocker.stop();
        blocker.stop();
        blocker.shutdown().await;
    }

    #[tokio::test]
    async fn exits_when_handle_dropped() {
        let (_paused_tx, paused_rx) = watch::channel(false);
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(app_blocker_task(Vec::new(), paused_rx, stop_rx));
        drop(stop_tx);
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("blocker did not exit")
            .expect("blocker panicked");
    }
}
