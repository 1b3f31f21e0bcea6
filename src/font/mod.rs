//! Big timer fonts
//!
//! Static glyph tables for the three digit styles and the renderer that
//! turns the remaining time into a shaded block of glyphs.

pub mod glyphs;
pub mod renderer;

// Re-export main types
pub use glyphs::{FontStyle, Glyph};
pub use renderer::{timer_color, time_string, DigitRenderer};
