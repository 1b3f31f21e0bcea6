//! Countdown session: the timer plus the active visualization and big digits

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use super::TimerState;
use crate::{
    color,
    font::{timer_color, DigitRenderer, FontStyle},
    frame::Frame,
    viz::{TickCadence, VizContext, VizMode, Visualization},
};

/// Everything the display needs, mutated only by the event handlers below
#[derive(Debug, Clone)]
pub struct Session {
    timer: TimerState,
    viz: Visualization,
    digits: DigitRenderer,
    task_name: Option<String>,
    blocked_apps: Vec<String>,
    width: u16,
    height: u16,
    started_at: Instant,
    rng: StdRng,
}

impl Session {
    /// Create a session for a countdown of `total`. `seed` drives every
    /// random layout the session generates.
    pub fn initialize(
        total: Duration,
        mode: Option<VizMode>,
        font: FontStyle,
        seed: u64,
        now: Instant,
    ) -> Self {
        info!(
            "Session started: duration={:?}, viz={:?}, font={:?}, seed={}",
            total, mode, font, seed
        );
        let timer = TimerState::new(total);
        let mut session = Self {
            timer,
            viz: Visualization::new(mode),
            digits: DigitRenderer::new(font),
            task_name: None,
            blocked_apps: Vec::new(),
            width: 0,
            height: 0,
            started_at: now,
            rng: StdRng::seed_from_u64(seed),
        };
        session.refresh(now);
        session
    }

    pub fn with_task_name(mut self, task_name: Option<String>) -> Self {
        self.task_name = task_name.filter(|name| !name.is_empty());
        self
    }

    pub fn with_blocked_apps(mut self, apps: Vec<String>) -> Self {
        self.blocked_apps = apps;
        self
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn visualization(&self) -> &Visualization {
        &self.viz
    }

    pub fn is_done(&self) -> bool {
        self.timer.is_done()
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Redraw rate needed by the active visualization and font
    pub fn cadence(&self) -> TickCadence {
        if self.digits.animates() {
            return TickCadence::Fast;
        }
        self.viz.cadence()
    }

    /// One second of countdown. Returns `true` when this tick finishes the timer.
    pub fn on_second_tick(&mut self, now: Instant) -> bool {
        if self.timer.is_paused() {
            return false;
        }
        let finished = self.timer.tick_second(now);
        if finished {
            info!("Countdown finished");
        }
        self.refresh(now);
        finished
    }

    /// Animation-only tick; never moves the countdown
    pub fn on_fast_tick(&mut self, now: Instant) {
        self.refresh(now);
    }

    pub fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        if (width, height) != (self.width, self.height) {
            debug!("Terminal resized to {}x{}", width, height);
        }
        self.width = width;
        self.height = height;
        self.viz.resize(width, &mut self.rng);
        self.refresh(now);
    }

    /// Returns the new pause state
    pub fn on_toggle_pause(&mut self) -> bool {
        let paused = self.timer.toggle_pause();
        info!("Timer {}", if paused { "paused" } else { "resumed" });
        paused
    }

    fn refresh(&mut self, now: Instant) {
        self.viz.refresh(&self.timer, now);
        self.digits.refresh(&self.timer, now);
    }

    /// Compose the full screen for instant `now`. Does not alter the session.
    pub fn render_frame(&self, now: Instant) -> Frame {
        let mut frame = Frame::new();
        if self.timer.is_done() {
            return frame;
        }

        let base = timer_color(self.timer.remaining_fraction());

        if let Some(name) = &self.task_name {
            frame.push_text(name, color::TEXT, true);
        }
        frame.push_blank_line();

        frame.append(self.digits.render(&self.timer, base, now));

        if self.timer.is_paused() {
            frame.push_blank_line();
            frame.push_text("PAUSED", color::WARNING, true);
        }

        let ctx = VizContext {
            fraction: self.timer.fraction(now),
            base,
            term_width: self.width,
            now,
            phase: now.saturating_duration_since(self.started_at),
        };
        let viz = self.viz.render(&self.timer, &ctx);
        if !viz.is_empty() {
            frame.push_blank_line();
            frame.append(viz);
        }

        if !self.blocked_apps.is_empty() {
            let apps: Vec<String> = self
                .blocked_apps
                .iter()
                .map(|app| format!("🔒 {}", app))
                .collect();
            frame.push_blank_line();
            frame.push_text(&apps.join("  "), color::DIM, false);
        }

        frame
    }
}
