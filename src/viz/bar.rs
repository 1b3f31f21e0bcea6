//! Progress bar with a neon pulse sweeping across it

use std::time::Duration;

use crate::{
    color::{self, clamp01, Rgb},
    frame::{push_text, Cell, Frame, Row},
};

pub const MAX_WIDTH: usize = 60;
pub const MIN_WIDTH: usize = 10;

/// Time for the pulse to cross the bar once
pub const PULSE_PERIOD: Duration = Duration::from_secs(2);

const FILLED: char = '█';
const EMPTY: char = '░';

/// Bar width for a terminal `term_width` columns wide
pub fn bar_width(term_width: u16) -> usize {
    (usize::from(term_width).saturating_sub(4))
        .min(MAX_WIDTH)
        .max(MIN_WIDTH)
}

/// Pulse center and half-width in cells, `phase` being the time since the
/// animation started
pub fn pulse(width: usize, phase: Duration) -> (f64, f64) {
    let period = PULSE_PERIOD.as_secs_f64();
    let t = (phase.as_secs_f64() % period) / period;
    let width = width as f64;
    (t * width, (width * 0.05).max(1.0))
}

fn pulse_boost(x: f64, center: f64, spread: f64) -> f64 {
    let dist = x - center;
    (-(dist * dist) / (2.0 * spread * spread)).exp()
}

pub fn render(fraction: f64, term_width: u16, base: Rgb, phase: Duration) -> Frame {
    let width = bar_width(term_width);
    let filled = ((fraction * width as f64) as usize).min(width);
    let (center, spread) = pulse(width, phase);

    let mut row: Row = (0..width)
        .map(|i| {
            let (ch, fg) = if i < filled {
                (FILLED, base)
            } else {
                (EMPTY, color::DIM)
            };
            let boost = pulse_boost(i as f64, center, spread);
            Cell::new(
                ch,
                color::modify(fg, |mut c| {
                    c.l = clamp01(c.l + boost * 0.35);
                    c
                }),
            )
        })
        .collect();

    push_text(
        &mut row,
        &format!(" {}%", (fraction * 100.0) as u32),
        color::TEXT,
    );
    Frame::from_rows(vec![row])
}
