//! Big digital clock rendering

use std::time::{Duration, Instant};

use tracing::debug;

use super::glyphs::{FontStyle, Glyph};
use crate::{
    color::{self, Rgb},
    frame::{Cell, Frame, Row},
    phosphor::CellTimestamps,
    state::TimerState,
};

/// At or below this share of time remaining the timer turns red
pub const ALERT_THRESHOLD: f64 = 0.10;
/// At or below this share of time remaining the timer turns yellow
pub const WARNING_THRESHOLD: f64 = 0.25;

/// How long a freshly lit dot stays brighter than its neighbours
pub const DOT_FLARE: Duration = Duration::from_millis(250);

const SHADOW_GLYPH: char = '▀';

/// Three-band timer color: nominal, warning, then alert as time runs out
pub fn timer_color(remaining_fraction: f64) -> Rgb {
    if remaining_fraction <= ALERT_THRESHOLD {
        color::ALERT
    } else if remaining_fraction <= WARNING_THRESHOLD {
        color::WARNING
    } else {
        color::NOMINAL
    }
}

/// `H:MM:SS` when hours remain, `MM:SS` otherwise
pub fn time_string(hours: u64, minutes: u64, seconds: u64) -> String {
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Glyph sequence for `text`, with a spacer between neighbours unless one
/// of them is the colon
fn layout(text: &str, style: FontStyle) -> Vec<Glyph> {
    let font = style.font();
    let chars: Vec<char> = text.chars().collect();
    let mut glyphs = Vec::with_capacity(chars.len() * 2);

    for (i, &ch) in chars.iter().enumerate() {
        glyphs.push(
            font.glyph(ch)
                .cloned()
                .unwrap_or_else(|| Glyph::passthrough(ch, font.height())),
        );
        if let Some(&next) = chars.get(i + 1) {
            if ch != ':' && next != ':' {
                glyphs.push(Glyph::spacer(font.height()));
            }
        }
    }
    glyphs
}

/// Character grid of the laid out glyphs, one `Vec<char>` per font row
fn char_grid(text: &str, style: FontStyle) -> Vec<Vec<char>> {
    let glyphs = layout(text, style);
    (0..style.font().height())
        .map(|r| glyphs.iter().flat_map(|g| g.row(r).iter().copied()).collect())
        .collect()
}

/// Renders the remaining time in large glyphs. The dot style keeps per-cell
/// timestamps so newly lit dots can flare.
#[derive(Debug, Clone)]
pub struct DigitRenderer {
    style: FontStyle,
    lit: CellTimestamps,
}

impl DigitRenderer {
    pub fn new(style: FontStyle) -> Self {
        Self {
            style,
            lit: CellTimestamps::new(),
        }
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Whether the renderer animates between whole seconds
    pub fn animates(&self) -> bool {
        self.style == FontStyle::Dot
    }

    /// Record which dots are lit for the current time
    pub fn refresh(&mut self, timer: &TimerState, now: Instant) {
        if self.style != FontStyle::Dot {
            return;
        }
        let (h, m, s) = timer.hms();
        let grid = char_grid(&time_string(h, m, s), self.style);
        let mask: Vec<bool> = grid.iter().flatten().map(|&ch| ch != ' ').collect();
        if mask.len() != self.lit.len() {
            debug!("Dot grid resized to {} cells", mask.len());
        }
        self.lit.update(&mask, now);
    }

    pub fn render(&self, timer: &TimerState, base: Rgb, now: Instant) -> Frame {
        let (h, m, s) = timer.hms();
        let grid = char_grid(&time_string(h, m, s), self.style);
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);

        let mut frame = Frame::new();
        for (r, chars) in grid.iter().enumerate() {
            let row_color = color::gradient(r, height, base);
            let row: Row = chars
                .iter()
                .enumerate()
                .map(|(c, &ch)| {
                    if ch == ' ' {
                        return Cell::blank();
                    }
                    let mut fg = row_color;
                    if self.style == FontStyle::Dot {
                        if let Some(k) = self.lit.flare(r * width + c, now, DOT_FLARE) {
                            fg = color::modify(row_color, |mut hsl| {
                                hsl.l += k * 0.4;
                                hsl
                            });
                        }
                    }
                    Cell::new(ch, fg)
                })
                .collect();
            frame.push_row(row);
        }

        if self.style == FontStyle::Block {
            if let Some(last) = grid.last() {
                frame.push_row(shadow_row(last, base));
            }
        }
        frame
    }
}

/// Shadow cast down and to the right by the bottom glyph row
fn shadow_row(bottom: &[char], base: Rgb) -> Row {
    let shade = color::modify(base, |mut c| {
        c.l *= 0.3;
        c.s *= 0.4;
        c
    });
    (0..=bottom.len())
        .map(|c| match c.checked_sub(1).and_then(|left| bottom.get(left)) {
            Some(&ch) if ch != ' ' => Cell::new(SHADOW_GLYPH, shade),
            _ => Cell::blank(),
        })
        .collect()
}
