//! Display loop: drives the session from timers, terminal events and signals

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::time::{interval, interval_at, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::AppBlocker;
use crate::{
    state::Session,
    terminal::Terminal,
    utils::{pause_toggle_signals, shutdown_signal},
    viz::{TickCadence, FAST_TICK},
};

/// How the display loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The countdown reached zero
    Finished,
    /// The user or a signal stopped it early
    Quit,
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    TogglePause,
    Ignore,
}

pub fn key_action(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(' ') => KeyAction::TogglePause,
        _ => KeyAction::Ignore,
    }
}

fn toggle_pause(session: &mut Session, blocker: Option<&AppBlocker>) {
    let paused = session.on_toggle_pause();
    if let Some(blocker) = blocker {
        blocker.set_paused(paused);
    }
}

/// Run the countdown on screen until it finishes or is stopped
pub async fn display_loop(
    session: &mut Session,
    blocker: Option<&AppBlocker>,
) -> anyhow::Result<Outcome> {
    let mut terminal = Terminal::enter()?;
    let (mut width, mut height) = Terminal::size()?;
    session.on_resize(width, height, Instant::now());
    terminal.draw(&session.render_frame(Instant::now()), width, height)?;

    let mut seconds = interval_at(
        tokio::time::Instant::now() + Duration::from_secs(1),
        Duration::from_secs(1),
    );
    seconds.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fast = interval(FAST_TICK);
    fast.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut events = EventStream::new();
    let mut pause_signals = pause_toggle_signals()?;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!("Display loop started");
    let outcome = loop {
        tokio::select! {
            _ = seconds.tick() => {
                if session.on_second_tick(Instant::now()) {
                    break Outcome::Finished;
                }
            }
            _ = fast.tick(), if session.cadence() == TickCadence::Fast => {
                session.on_fast_tick(Instant::now());
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => match key_action(&key) {
                    KeyAction::Quit => break Outcome::Quit,
                    KeyAction::TogglePause => toggle_pause(session, blocker),
                    KeyAction::Ignore => continue,
                },
                Some(Ok(Event::Resize(w, h))) => {
                    width = w;
                    height = h;
                    session.on_resize(w, h, Instant::now());
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    error!("Terminal event error: {}", e);
                    return Err(e.into());
                }
                None => {
                    warn!("Terminal event stream closed");
                    break Outcome::Quit;
                }
            },
            Some(signal) = pause_signals.next() => {
                debug!("Received pause toggle signal {}", signal);
                toggle_pause(session, blocker);
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!("Signal handler failed: {}", e);
                }
                break Outcome::Quit;
            }
        }

        terminal.draw(&session.render_frame(Instant::now()), width, height)?;
    };

    if let Some(blocker) = blocker {
        blocker.stop();
    }
    info!("Display loop ended: {:?}", outcome);
    Ok(outcome)
}
