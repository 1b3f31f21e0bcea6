//! Process management for app blocking

use tokio::process::Command;
use tracing::{debug, warn};

/// Kill every process whose name is exactly `app_name`.
///
/// Returns whether anything was killed; `pkill` exits non-zero when nothing
/// matched, which is not an error.
pub async fn kill_app(app_name: &str) -> Result<bool, String> {
    debug!("Attempting to kill {} processes", app_name);

    let output = Command::new("pkill")
        .args(["-x", app_name])
        .output()
        .await
        .map_err(|e| format!("Failed to execute pkill: {}", e))?;

    let killed = output.status.success();
    if killed {
        debug!("Killed {}", app_name);
    }
    Ok(killed)
}

/// Kill each app in turn, logging failures rather than stopping
pub async fn kill_apps(apps: &[String]) {
    for app in apps {
        if let Err(e) = kill_app(app).await {
            warn!("Failed to kill {}: {}", app, e);
        }
    }
}
