//! Glyph tables for the big timer digits

use std::{collections::HashMap, sync::LazyLock};

use clap::ValueEnum;

/// Digit style for the big timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum FontStyle {
    /// Seven rows of solid blocks with a drop shadow
    Block,
    /// Three rows of half blocks
    #[default]
    Slim,
    /// Five rows of dots that flare when they light up
    Dot,
}

impl FontStyle {
    pub fn font(self) -> &'static Font {
        match self {
            FontStyle::Block => &BLOCK,
            FontStyle::Slim => &SLIM,
            FontStyle::Dot => &DOT,
        }
    }
}

/// A single glyph as a grid of chars; every row has the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Vec<char>>,
}

impl Glyph {
    fn from_rows(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.chars().collect()).collect(),
        }
    }

    /// One column wide, `ch` on the middle row
    pub fn passthrough(ch: char, height: usize) -> Self {
        let mid = height / 2;
        Self {
            rows: (0..height.max(1))
                .map(|r| vec![if r == mid { ch } else { ' ' }])
                .collect(),
        }
    }

    /// Blank column used between adjacent digits
    pub fn spacer(height: usize) -> Self {
        Self {
            rows: vec![vec![' ']; height],
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn row(&self, r: usize) -> &[char] {
        &self.rows[r]
    }
}

#[derive(Debug)]
pub struct Font {
    height: usize,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// Build a font, center-padding every digit to the widest digit. The
    /// colon keeps its own width.
    fn new(height: usize, table: &[(char, [&str; 7])]) -> Self {
        let digit_width = table
            .iter()
            .filter(|(ch, _)| *ch != ':')
            .flat_map(|(_, rows)| rows[..height].iter())
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);

        let glyphs = table
            .iter()
            .map(|(ch, rows)| {
                let mut glyph = Glyph::from_rows(&rows[..height]);
                if *ch != ':' {
                    for row in &mut glyph.rows {
                        let pad = digit_width - row.len();
                        let left = pad / 2;
                        row.splice(0..0, std::iter::repeat(' ').take(left));
                        row.extend(std::iter::repeat(' ').take(pad - left));
                    }
                }
                (*ch, glyph)
            })
            .collect();

        Self { height, glyphs }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }
}

// Tables are padded to seven rows; shorter fonts ignore the trailing "".

static BLOCK: LazyLock<Font> = LazyLock::new(|| {
    Font::new(
        7,
        &[
            ('0', [" ██████ ", "██    ██", "██    ██", "██    ██", "██    ██", "██    ██", " ██████ "]),
            ('1', ["    ██  ", "  ████  ", "    ██  ", "    ██  ", "    ██  ", "    ██  ", " ██████ "]),
            ('2', [" ██████ ", "██    ██", "      ██", "  ██████", "██      ", "██      ", "████████"]),
            ('3', [" ██████ ", "██    ██", "      ██", "  ██████", "      ██", "██    ██", " ██████ "]),
            ('4', ["██    ██", "██    ██", "██    ██", "████████", "      ██", "      ██", "      ██"]),
            ('5', ["████████", "██      ", "██      ", "██████  ", "      ██", "██    ██", " ██████ "]),
            ('6', [" ██████ ", "██      ", "██      ", "██████  ", "██    ██", "██    ██", " ██████ "]),
            ('7', ["████████", "      ██", "     ██ ", "    ██  ", "   ██   ", "  ██    ", "  ██    "]),
            ('8', [" ██████ ", "██    ██", "██    ██", " ██████ ", "██    ██", "██    ██", " ██████ "]),
            ('9', [" ██████ ", "██    ██", "██    ██", " ███████", "      ██", "      ██", " ██████ "]),
            (':', ["      ", "  ██  ", "  ██  ", "      ", "  ██  ", "  ██  ", "      "]),
        ],
    )
});

static SLIM: LazyLock<Font> = LazyLock::new(|| {
    Font::new(
        3,
        &[
            ('0', ["█▀▀█", "█  █", "█▄▄█", "", "", "", ""]),
            ('1', ["  █ ", "  █ ", " ███", "", "", "", ""]),
            ('2', ["▀▀▀█", "█▀▀▀", "█▄▄▄", "", "", "", ""]),
            ('3', ["▀▀▀█", " ▀▀█", "▄▄▄█", "", "", "", ""]),
            ('4', ["█  █", "▀▀▀█", "   █", "", "", "", ""]),
            ('5', ["█▀▀▀", "▀▀▀█", "▄▄▄█", "", "", "", ""]),
            ('6', ["█▀▀▀", "█▀▀█", "█▄▄█", "", "", "", ""]),
            ('7', ["▀▀▀█", "  █ ", " █  ", "", "", "", ""]),
            ('8', ["█▀▀█", "█▀▀█", "█▄▄█", "", "", "", ""]),
            ('9', ["█▀▀█", "▀▀▀█", "▄▄▄█", "", "", "", ""]),
            (':', [" ▄▄ ", "    ", " ▀▀ ", "", "", "", ""]),
        ],
    )
});

static DOT: LazyLock<Font> = LazyLock::new(|| {
    Font::new(
        5,
        &[
            ('0', [" ●●● ", "●   ●", "●   ●", "●   ●", " ●●● ", "", ""]),
            ('1', ["  ●  ", " ●●  ", "  ●  ", "  ●  ", " ●●● ", "", ""]),
            ('2', [" ●●● ", "●   ●", "  ●● ", " ●   ", "●●●●●", "", ""]),
            ('3', [" ●●● ", "    ●", "  ●● ", "    ●", " ●●● ", "", ""]),
            ('4', ["●   ●", "●   ●", "●●●●●", "    ●", "    ●", "", ""]),
            ('5', ["●●●●●", "●    ", "●●●● ", "    ●", "●●●● ", "", ""]),
            ('6', [" ●●● ", "●    ", "●●●● ", "●   ●", " ●●● ", "", ""]),
            ('7', ["●●●●●", "   ● ", "  ●  ", " ●   ", " ●   ", "", ""]),
            ('8', [" ●●● ", "●   ●", " ●●● ", "●   ●", " ●●● ", "", ""]),
            ('9', [" ●●● ", "●   ●", " ●●●●", "    ●", " ●●● ", "", ""]),
            (':', ["     ", "  ●  ", "     ", "  ●  ", "     ", "", ""]),
        ],
    )
});
