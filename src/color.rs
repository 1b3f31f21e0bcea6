//! Color math: RGB/hex/HSL conversion and the shading helpers every
//! visualization is built from

use thiserror::Error;

/// Bright green, used while plenty of time remains
pub const NOMINAL: Rgb = Rgb::new(0x55, 0xff, 0x55);
/// Bright yellow
pub const WARNING: Rgb = Rgb::new(0xff, 0xff, 0x55);
/// Bright red
pub const ALERT: Rgb = Rgb::new(0xff, 0x55, 0x55);
/// Dark gray for inactive cells
pub const DIM: Rgb = Rgb::new(0x55, 0x55, 0x55);
/// Light gray for plain text
pub const TEXT: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);

pub const DEFRAG_DATA: Rgb = Rgb::new(0x55, 0x55, 0xff);
pub const DEFRAG_FRAGMENT: Rgb = Rgb::new(0xff, 0x55, 0x55);
pub const DEFRAG_FREE: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Errors produced when decoding a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit-per-channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue, saturation and lightness, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidLength(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigit(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        let channel = |v: f64| (clamp01(v) * 255.0).round() as u8;

        if self.s == 0.0 {
            let v = channel(self.l);
            return Rgb::new(v, v, v);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        Rgb::new(
            channel(hue_to_rgb(p, q, self.h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, self.h)),
            channel(hue_to_rgb(p, q, self.h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Decode `base` into HSL, apply `transform`, clamp saturation and lightness
/// and encode back to RGB
pub fn modify<F>(base: Rgb, transform: F) -> Rgb
where
    F: FnOnce(Hsl) -> Hsl,
{
    let mut c = transform(base.to_hsl());
    c.s = clamp01(c.s);
    c.l = clamp01(c.l);
    c.to_rgb()
}

/// Top-lit vertical shading: brightest on the first row, darkest on the last
pub fn gradient(row: usize, total_rows: usize, base: Rgb) -> Rgb {
    if total_rows <= 1 {
        return base;
    }
    let frac = row as f64 / (total_rows - 1) as f64;
    modify(base, |mut c| {
        c.l *= 1.15 - frac * 0.65;
        c
    })
}

/// Fully saturated color whose hue tracks `value / total` over `[0, 0.85)`,
/// stopping before the hue wheel wraps back to red
pub fn rainbow(value: usize, total: usize, lightness: f64) -> Rgb {
    let h = if total == 0 {
        0.0
    } else {
        value as f64 / total as f64 * 0.85
    };
    modify(Rgb::new(0, 0, 0), |_| Hsl {
        h,
        s: 1.0,
        l: lightness,
    })
}
