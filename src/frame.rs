//! Rendered output: a grid of colored glyph cells

use crate::color::Rgb;

/// One terminal column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Foreground color, `None` for the terminal default
    pub fg: Option<Rgb>,
    pub bold: bool,
}

impl Cell {
    pub fn new(ch: char, fg: Rgb) -> Self {
        Self {
            ch,
            fg: Some(fg),
            bold: false,
        }
    }

    pub fn blank() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

pub type Row = Vec<Cell>;

/// Push `text` onto `row`, one cell per char, all in `fg`
pub fn push_text(row: &mut Row, text: &str, fg: Rgb) {
    row.extend(text.chars().map(|ch| Cell::new(ch, fg)));
}

pub fn push_blanks(row: &mut Row, n: usize) {
    row.extend(std::iter::repeat(Cell::blank()).take(n));
}

/// A block of rows, each possibly of a different width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Row>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn push_blank_line(&mut self) {
        self.rows.push(Row::new());
    }

    pub fn push_text(&mut self, text: &str, fg: Rgb, bold: bool) {
        let mut row = Row::new();
        push_text(&mut row, text, fg);
        if bold {
            row.iter_mut().for_each(|c| c.bold = true);
        }
        self.rows.push(row);
    }

    /// Append another frame's rows below this one
    pub fn append(&mut self, other: Frame) {
        self.rows.extend(other.rows);
    }

    /// Characters only, rows joined by newlines, trailing blanks trimmed
    pub fn to_plain_string(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
