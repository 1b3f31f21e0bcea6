//! Binary-coded decimal clock with phosphor-style flare and afterglow

use std::time::{Duration, Instant};

use crate::{
    color::{self, Rgb},
    frame::{push_blanks, push_text, Frame, Row},
    phosphor::CellTimestamps,
    state::TimerState,
};

/// Brightness boost window after a bit switches on
pub const FLARE: Duration = Duration::from_millis(150);
/// Residual glow window after a bit switches off
pub const AFTERGLOW: Duration = Duration::from_millis(100);

/// Bit weights, top row first
const WEIGHTS: [u8; 4] = [8, 4, 2, 1];

const DIGIT_GAP: usize = 2;
const GROUP_GAP: usize = 4;

/// Decimal digits of the remaining time grouped as hours (only when
/// nonzero), minutes and seconds
pub fn digit_groups(timer: &TimerState) -> Vec<Vec<u8>> {
    let (h, m, s) = timer.hms();
    let mut groups = Vec::with_capacity(3);
    if h > 0 {
        groups.push(h.to_string().bytes().map(|b| b - b'0').collect());
    }
    groups.push(vec![(m / 10) as u8, (m % 10) as u8]);
    groups.push(vec![(s / 10) as u8, (s % 10) as u8]);
    groups
}

/// Four bits per digit, most significant first
pub fn bits(groups: &[Vec<u8>]) -> Vec<bool> {
    groups
        .iter()
        .flatten()
        .flat_map(|&d| WEIGHTS.iter().map(move |&w| d & w != 0))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryClock {
    cells: CellTimestamps,
}

impl BinaryClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp bit transitions for the current remaining time
    pub fn refresh(&mut self, timer: &TimerState, now: Instant) {
        let current = bits(&digit_groups(timer));
        self.cells.update(&current, now);
    }

    /// Color of bit `i` given its current value
    pub fn bit_color(&self, i: usize, on: bool, base: Rgb, now: Instant) -> Rgb {
        if on {
            return match self.cells.flare(i, now, FLARE) {
                Some(k) => color::modify(base, |mut c| {
                    c.l += k * 0.4;
                    c
                }),
                None => base,
            };
        }
        match self.cells.afterglow(i, now, AFTERGLOW) {
            Some(k) => {
                let rest = color::DIM.to_hsl().l;
                color::modify(base, |mut c| {
                    c.l = rest + (c.l - rest) * k * 0.5;
                    c.s *= k;
                    c
                })
            }
            None => color::DIM,
        }
    }

    pub fn render(&self, timer: &TimerState, base: Rgb, now: Instant) -> Frame {
        let groups = digit_groups(timer);
        let mut rows: Vec<Row> = vec![Row::new(); WEIGHTS.len()];

        let mut bit = 0;
        for (gi, group) in groups.iter().enumerate() {
            for (di, &digit) in group.iter().enumerate() {
                let gap = match (gi, di) {
                    (0, 0) => 0,
                    (_, 0) => GROUP_GAP,
                    _ => DIGIT_GAP,
                };
                for (r, &weight) in WEIGHTS.iter().enumerate() {
                    let row = &mut rows[r];
                    push_blanks(row, gap);
                    let on = digit & weight != 0;
                    let fg = self.bit_color(bit + r, on, base, now);
                    push_text(row, if on { "██" } else { "░░" }, fg);
                }
                bit += WEIGHTS.len();
            }
        }
        Frame::from_rows(rows)
    }
}
