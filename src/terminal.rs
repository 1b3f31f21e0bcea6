//! Terminal output: raw mode, alternate screen and frame drawing

use std::io::{self, Stdout, Write};

use anyhow::Context;
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use tracing::warn;

use crate::frame::Frame;

/// Owns the terminal while the timer is on screen; restores it on drop
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self { stdout })
    }

    pub fn size() -> anyhow::Result<(u16, u16)> {
        terminal::size().context("Failed to read terminal size")
    }

    /// Draw `frame` centered in a `width` x `height` terminal. Each row is
    /// centered within the frame's own width.
    pub fn draw(&mut self, frame: &Frame, width: u16, height: u16) -> anyhow::Result<()> {
        let frame_width = frame.width();
        let left = usize::from(width).saturating_sub(frame_width) / 2;
        let top = usize::from(height).saturating_sub(frame.height()) / 2;

        queue!(self.stdout, BeginSynchronizedUpdate, Clear(ClearType::All))?;
        for (r, row) in frame.rows().iter().enumerate() {
            let y = top + r;
            if y >= usize::from(height) {
                break;
            }
            let x = left + frame_width.saturating_sub(row.len()) / 2;
            queue!(self.stdout, cursor::MoveTo(clamp_u16(x), clamp_u16(y)))?;

            let visible = usize::from(width).saturating_sub(x);
            for cell in row.iter().take(visible) {
                match cell.fg {
                    Some(c) => queue!(
                        self.stdout,
                        SetForegroundColor(Color::Rgb {
                            r: c.r,
                            g: c.g,
                            b: c.b
                        })
                    )?,
                    None => queue!(self.stdout, ResetColor)?,
                }
                if cell.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.stdout, Print(cell.ch))?;
                if cell.bold {
                    queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
                }
            }
            queue!(self.stdout, ResetColor)?;
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush().context("Failed to flush frame")?;
        Ok(())
    }
}

fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}
