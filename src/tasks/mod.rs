//! Background tasks module
//!
//! This module contains the background tasks that run alongside the console.

pub mod ticker;

// Re-export main functions
pub use ticker::{ticker_task, TICK_PERIOD};
