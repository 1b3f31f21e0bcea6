//! Per-cell transition timestamps for flare and afterglow effects

use std::time::{Duration, Instant};

/// Tracks when each cell of a fixed-size on/off vector last switched on or off
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellTimestamps {
    prev: Vec<bool>,
    on_at: Vec<Option<Instant>>,
    off_at: Vec<Option<Instant>>,
}

impl CellTimestamps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.prev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_empty()
    }

    /// Compare `current` against the previous vector and stamp transitions.
    ///
    /// A length change is a hard reset: every timestamp is cleared and cells
    /// that are already lit are stamped as switching on now.
    pub fn update(&mut self, current: &[bool], now: Instant) {
        if current.len() != self.prev.len() {
            self.prev = current.to_vec();
            self.on_at = current.iter().map(|&on| on.then_some(now)).collect();
            self.off_at = vec![None; current.len()];
            return;
        }

        for (i, &on) in current.iter().enumerate() {
            match (self.prev[i], on) {
                (false, true) => self.on_at[i] = Some(now),
                (true, false) => self.off_at[i] = Some(now),
                _ => {}
            }
        }
        self.prev.copy_from_slice(current);
    }

    /// Remaining flare intensity in `(0, 1]` if cell `i` switched on less than
    /// `window` ago
    pub fn flare(&self, i: usize, now: Instant, window: Duration) -> Option<f64> {
        decay(self.on_at.get(i).copied().flatten(), now, window)
    }

    /// Remaining afterglow intensity in `(0, 1]` if cell `i` switched off less
    /// than `window` ago
    pub fn afterglow(&self, i: usize, now: Instant, window: Duration) -> Option<f64> {
        decay(self.off_at.get(i).copied().flatten(), now, window)
    }
}

fn decay(stamp: Option<Instant>, now: Instant, window: Duration) -> Option<f64> {
    let elapsed = now.saturating_duration_since(stamp?);
    if elapsed >= window {
        return None;
    }
    Some(1.0 - elapsed.as_secs_f64() / window.as_secs_f64())
}
