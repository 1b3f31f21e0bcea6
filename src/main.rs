//! Lockin - A focus timer for the terminal
//!
//! This is the main entry point for the lockin application.

use std::{fs::OpenOptions, sync::Mutex, time::Instant};

use anyhow::Context;
use chrono::{Local, TimeDelta};
use tracing::info;

use lockin::{
    config::{format_duration, Config},
    state::Session,
    tasks::{display_loop, AppBlocker, Outcome},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // The terminal belongs to the display, so logs only go to a file
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(format!("lockin={}", config.log_level()))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let started_at = Local::now();
    let ends_at = TimeDelta::from_std(config.duration)
        .ok()
        .and_then(|d| started_at.checked_add_signed(d));
    info!("Starting lockin v2.0.0");
    info!(
        "Configuration: duration={}, viz={:?}, font={:?}, block={:?}, seed={}",
        format_duration(config.duration),
        config.viz,
        config.font,
        config.blocked_apps(),
        seed
    );
    if let Some(ends_at) = ends_at {
        info!("Timer ends at {}", ends_at.format("%H:%M:%S"));
    }

    let apps = config.blocked_apps();
    let mut session = Session::initialize(config.duration, config.viz, config.font, seed, Instant::now())
        .with_task_name(config.task_name.clone())
        .with_blocked_apps(apps.clone());

    let blocker = if apps.is_empty() {
        None
    } else {
        Some(AppBlocker::spawn(apps))
    };

    let outcome = display_loop(&mut session, blocker.as_ref()).await;

    if let Some(blocker) = blocker {
        blocker.shutdown().await;
    }

    if outcome? == Outcome::Finished {
        let task = config
            .task_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!(" — {}", name))
            .unwrap_or_default();
        println!("lockin: {} complete{}", format_duration(config.duration), task);
    }

    info!(
        "Session ended after {}s",
        (Local::now() - started_at).num_seconds()
    );
    Ok(())
}
