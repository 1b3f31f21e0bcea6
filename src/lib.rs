//! Lockin - A focus timer for the terminal
//!
//! This library provides the countdown state, the procedurally animated
//! visualizations drawn beneath the big timer digits, and the plumbing that
//! puts them on screen.

pub mod color;
pub mod config;
pub mod font;
pub mod frame;
pub mod phosphor;
pub mod services;
pub mod state;
pub mod tasks;
pub mod terminal;
pub mod utils;
pub mod viz;

// Re-export commonly used types
pub use config::Config;
pub use frame::{Cell, Frame};
pub use state::{Session, TimerState};
pub use utils::signals::shutdown_signal;
