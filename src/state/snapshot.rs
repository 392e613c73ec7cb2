//! Read-only view of the timer handed to the shell

use serde::{Deserialize, Serialize};

use super::{Control, Phase};

/// Everything the shell reads after an interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub elapsed_seconds: u64,
    /// Elapsed time formatted as "MM:SS"
    pub elapsed: String,
    pub can_show_start: bool,
    pub can_show_stop: bool,
    pub can_show_pause: bool,
    pub can_show_resume: bool,
}

impl TimerSnapshot {
    /// Controls to offer, in menu order
    pub fn controls(&self) -> Vec<Control> {
        [
            (Control::Start, self.can_show_start),
            (Control::Pause, self.can_show_pause),
            (Control::Resume, self.can_show_resume),
            (Control::Stop, self.can_show_stop),
        ]
        .into_iter()
        .filter_map(|(control, visible)| visible.then_some(control))
        .collect()
    }

    /// One-line status label, e.g. "Working 12:34"
    pub fn label(&self) -> String {
        format!("{} {}", self.phase.label(), self.elapsed)
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        super::TimerMachine::new().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_waiting() {
        let snapshot = TimerSnapshot::default();
        assert_eq!(snapshot.phase, Phase::Waiting);
        assert_eq!(snapshot.label(), "Waiting 00:00");
        assert!(snapshot.can_show_start);
        assert!(!snapshot.can_show_stop);
    }

    #[test]
    fn test_controls_follow_flags() {
        let mut machine = crate::state::TimerMachine::new();
        assert_eq!(machine.snapshot().controls(), vec![Control::Start]);

        machine.start();
        assert_eq!(machine.snapshot().controls(), machine.visible_controls());
        machine.pause();
        assert_eq!(machine.snapshot().controls(), vec![Control::Resume, Control::Stop]);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(TimerSnapshot::default()).unwrap();
        assert_eq!(json["phase"], "waiting");
        assert_eq!(json["elapsed"], "00:00");
        assert_eq!(json["elapsed_seconds"], 0);
        assert_eq!(json["can_show_resume"], false);
    }
}
