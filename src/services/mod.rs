//! External side effects module
//!
//! This module contains the functions that reach outside the process, such as
//! desktop notifications on phase boundaries.

pub mod notifications;

// Re-export main functions
pub use notifications::*;
