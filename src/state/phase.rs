//! Timer phases and the user-facing controls

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Length of a work interval in seconds (25 minutes)
pub const WORKING_MAX_SECONDS: u64 = 1500;
/// Length of a rest interval in seconds (5 minutes)
pub const RESTING_MAX_SECONDS: u64 = 300;

/// The four mutually exclusive operating modes of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    Working,
    Resting,
    Paused,
}

impl Phase {
    /// Every phase, in menu order
    pub const ALL: [Phase; 4] = [Phase::Waiting, Phase::Working, Phase::Resting, Phase::Paused];

    /// Lowercase state name
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Working => "working",
            Phase::Resting => "resting",
            Phase::Paused => "paused",
        }
    }

    /// Capitalized name used for the status label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Waiting => "Waiting",
            Phase::Working => "Working",
            Phase::Resting => "Resting",
            Phase::Paused => "Paused",
        }
    }

    /// Maximum duration of the phase; `None` for phases that wait on a command
    pub fn max_seconds(&self) -> Option<u64> {
        match self {
            Phase::Working => Some(WORKING_MAX_SECONDS),
            Phase::Resting => Some(RESTING_MAX_SECONDS),
            Phase::Waiting | Phase::Paused => None,
        }
    }

    /// Whether the clock advances in this phase
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Working | Phase::Resting)
    }

    /// Phase entered when a running phase reaches its maximum
    pub fn next_running(&self) -> Option<Phase> {
        match self {
            Phase::Working => Some(Phase::Resting),
            Phase::Resting => Some(Phase::Working),
            Phase::Waiting | Phase::Paused => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == wanted)
            .ok_or_else(|| format!("Unknown phase: {}", s.trim()))
    }
}

/// Controls the shell can offer to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Start,
    Pause,
    Resume,
    Stop,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Pause => "pause",
            Control::Resume => "resume",
            Control::Stop => "stop",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_seconds() {
        assert_eq!(Phase::Working.max_seconds(), Some(1500));
        assert_eq!(Phase::Resting.max_seconds(), Some(300));
        assert_eq!(Phase::Waiting.max_seconds(), None);
        assert_eq!(Phase::Paused.max_seconds(), None);
    }

    #[test]
    fn test_running_cycle() {
        assert_eq!(Phase::Working.next_running(), Some(Phase::Resting));
        assert_eq!(Phase::Resting.next_running(), Some(Phase::Working));
        assert_eq!(Phase::Paused.next_running(), None);
        assert!(Phase::Working.is_running());
        assert!(!Phase::Waiting.is_running());
    }

    #[test]
    fn test_names() {
        assert_eq!(Phase::Waiting.as_str(), "waiting");
        assert_eq!(Phase::Resting.to_string(), "Resting");
        assert_eq!(" Paused ".parse::<Phase>(), Ok(Phase::Paused));
        assert!("sleeping".parse::<Phase>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Phase::Working).unwrap(), "\"working\"");
        assert_eq!(serde_json::to_string(&Control::Resume).unwrap(), "\"resume\"");
        let phase: Phase = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(phase, Phase::Paused);
    }
}
