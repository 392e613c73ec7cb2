//! Pomodoro Indicator - a work/rest interval timer
//!
//! The core is [`state::TimerMachine`], a small state machine that alternates
//! 25-minute work intervals with 5-minute rests. The rest of the crate is the
//! shell around it: a ticker that drives the machine once per second, a
//! notifier for phase boundaries, and a line-based console.

pub mod config;
pub mod state;
pub mod console;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Phase, TimerMachine};
pub use console::console_loop;
pub use utils::signals::shutdown_signal;
