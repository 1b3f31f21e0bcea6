//! Background tasks module
//!
//! This module contains the display loop and the tasks that run alongside it.

pub mod app_blocker;
pub mod display;

// Re-export main functions
pub use app_blocker::{app_blocker_task, AppBlocker};
pub use display::{display_loop, Outcome};
