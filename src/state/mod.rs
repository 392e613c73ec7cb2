//! State management module
//!
//! This module contains the timer state machine and the shared owner that
//! serializes access to it.

pub mod phase;
pub mod machine;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use phase::{Control, Phase, RESTING_MAX_SECONDS, WORKING_MAX_SECONDS};
pub use machine::{format_elapsed, TimerMachine};
pub use snapshot::TimerSnapshot;
pub use app_state::AppState;
