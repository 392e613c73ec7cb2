//! Work/rest state machine
//!
//! All state lives in one flat struct; every (phase, command) pair is either a
//! transition or a silent no-op.

use tracing::debug;

use super::{Control, Phase, TimerSnapshot};

/// Format a number of seconds as "MM:SS"
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Pomodoro timer state: current phase, time spent in it, and what to restore after a pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerMachine {
    phase: Phase,
    elapsed_seconds: u64,
    /// Only set while `phase == Paused`
    saved_phase: Option<Phase>,
    saved_elapsed_seconds: u64,
}

impl TimerMachine {
    /// Create a machine in the `Waiting` phase
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            elapsed_seconds: 0,
            saved_phase: None,
            saved_elapsed_seconds: 0,
        }
    }

    /// Begin a work interval. Only valid from `Waiting`.
    pub fn start(&mut self) {
        if self.phase != Phase::Waiting {
            return;
        }
        self.enter(Phase::Working);
    }

    /// Suspend the running phase, remembering where it was
    pub fn pause(&mut self) {
        if !self.phase.is_running() {
            return;
        }
        self.saved_phase = Some(self.phase);
        self.saved_elapsed_seconds = self.elapsed_seconds;
        self.enter(Phase::Paused);
    }

    /// Return to the phase suspended by `pause`
    pub fn resume(&mut self) {
        if self.phase != Phase::Paused {
            return;
        }
        if let Some(saved) = self.saved_phase.take() {
            self.phase = saved;
            self.elapsed_seconds = self.saved_elapsed_seconds;
            self.saved_elapsed_seconds = 0;
        }
    }

    /// Go back to `Waiting` from anywhere, dropping any pause state
    pub fn stop(&mut self) {
        self.saved_phase = None;
        self.saved_elapsed_seconds = 0;
        self.enter(Phase::Waiting);
    }

    /// Advance one second. Returns true when a phase boundary was crossed.
    pub fn tick(&mut self) -> bool {
        let Some(max) = self.phase.max_seconds() else {
            return false;
        };

        self.elapsed_seconds += 1;
        if self.elapsed_seconds < max {
            return false;
        }

        match self.phase.next_running() {
            Some(next) => {
                debug!("{} finished after {}s, entering {}", self.phase, max, next);
                self.enter(next);
                true
            }
            None => false,
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time in the current phase as "MM:SS"
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    pub fn is_in(&self, phase: Phase) -> bool {
        self.phase == phase
    }

    pub fn can_show_start(&self) -> bool {
        self.phase == Phase::Waiting
    }

    pub fn can_show_stop(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn can_show_pause(&self) -> bool {
        self.phase.is_running()
    }

    pub fn can_show_resume(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Controls to offer in the current phase, in menu order
    pub fn visible_controls(&self) -> Vec<Control> {
        self.snapshot().controls()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            elapsed_seconds: self.elapsed_seconds,
            elapsed: self.formatted_elapsed(),
            can_show_start: self.can_show_start(),
            can_show_stop: self.can_show_stop(),
            can_show_pause: self.can_show_pause(),
            can_show_resume: self.can_show_resume(),
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.elapsed_seconds = 0;
    }
}

impl Default for TimerMachine {
    fn default() -> Self {
        Self::new()
    }
}
