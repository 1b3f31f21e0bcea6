//! State management module
//!
//! This module contains the countdown timer and the session built around it.

pub mod session;
pub mod timer_state;

// Re-export main types
pub use session::Session;
pub use timer_state::TimerState;
