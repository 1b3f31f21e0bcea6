//! External process management module
//!
//! This module wraps the system commands used to keep blocked apps closed.

pub mod process;

// Re-export main functions
pub use process::*;
