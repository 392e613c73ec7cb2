//! Console command parsing and handlers

use std::str::FromStr;
use tracing::{error, info};

use crate::state::{AppState, Control, Phase};
use super::responses::{CommandResponse, ConsoleResponse, StatusResponse};

pub const HELP_TEXT: &str = "commands: start, pause, resume, stop, status, help, quit";

/// A line typed at the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// The timer control this command maps to, if any
    pub fn control(&self) -> Option<Control> {
        match self {
            ConsoleCommand::Start => Some(Control::Start),
            ConsoleCommand::Pause => Some(Control::Pause),
            ConsoleCommand::Resume => Some(Control::Resume),
            ConsoleCommand::Stop => Some(Control::Stop),
            ConsoleCommand::Status | ConsoleCommand::Help | ConsoleCommand::Quit => None,
        }
    }
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(ConsoleCommand::Start),
            "pause" => Ok(ConsoleCommand::Pause),
            "resume" => Ok(ConsoleCommand::Resume),
            "stop" => Ok(ConsoleCommand::Stop),
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(format!("Unknown command: {} ({})", other, HELP_TEXT)),
        }
    }
}

/// Dispatch a command against the shared state
pub fn handle_command(state: &AppState, command: ConsoleCommand) -> Result<ConsoleResponse, String> {
    if let Some(control) = command.control() {
        return control_handler(state, control).map(ConsoleResponse::Command);
    }

    match command {
        ConsoleCommand::Status => status_handler(state).map(ConsoleResponse::Status),
        ConsoleCommand::Help => Ok(ConsoleResponse::Help(HELP_TEXT)),
        _ => Ok(ConsoleResponse::Quit),
    }
}

/// Handle start/pause/resume/stop. Commands that do not apply are reported, not rejected.
pub fn control_handler(state: &AppState, control: Control) -> Result<CommandResponse, String> {
    let (changed, timer) = state.apply(control).map_err(|e| {
        error!("Failed to apply {}: {}", control, e);
        e
    })?;

    if changed {
        info!("Console {} command applied", control);
        Ok(CommandResponse::changed(changed_message(control, timer.phase), timer))
    } else {
        let message = format!("{} ignored while {}", control, timer.phase.as_str());
        Ok(CommandResponse::unchanged(message, timer))
    }
}

/// Handle status - report the timer and the controls available now
pub fn status_handler(state: &AppState) -> Result<StatusResponse, String> {
    let timer = state.latest_snapshot();
    let controls = timer.controls();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(StatusResponse {
        timer,
        controls,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

fn changed_message(control: Control, phase: Phase) -> String {
    match control {
        Control::Start => "Work interval started".to_string(),
        Control::Pause => "Timer paused".to_string(),
        Control::Resume => format!("Resumed {}", phase.as_str()),
        Control::Stop => "Timer stopped".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &AppState, command: ConsoleCommand) -> CommandResponse {
        match handle_command(state, command).unwrap() {
            ConsoleResponse::Command(response) => response,
            other => panic!("expected command response, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("start".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Start));
        assert_eq!("  PAUSE \n".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Pause));
        assert_eq!("exit".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Quit));
        let err = "snooze".parse::<ConsoleCommand>().unwrap_err();
        assert!(err.contains("snooze"));
    }

    #[test]
    fn test_start_then_repeat() {
        let state = AppState::new(None);

        let response = run(&state, ConsoleCommand::Start);
        assert!(response.is_changed());
        assert_eq!(response.message, "Work interval started");
        assert_eq!(response.timer.phase, Phase::Working);

        let response = run(&state, ConsoleCommand::Start);
        assert!(!response.is_changed());
        assert_eq!(response.message, "start ignored while working");
    }

    #[test]
    fn test_invalid_commands_are_no_ops() {
        let state = AppState::new(None);
        for command in [ConsoleCommand::Pause, ConsoleCommand::Resume] {
            let response = run(&state, command);
            assert_eq!(response.status, "unchanged");
            assert_eq!(response.timer.phase, Phase::Waiting);
        }
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let state = AppState::new(None);
        run(&state, ConsoleCommand::Start);
        for _ in 0..90 {
            state.tick().unwrap();
        }

        assert_eq!(run(&state, ConsoleCommand::Pause).timer.phase, Phase::Paused);
        let response = run(&state, ConsoleCommand::Resume);
        assert_eq!(response.message, "Resumed working");
        assert_eq!(response.timer.elapsed, "01:30");
    }

    #[test]
    fn test_status_lists_controls() {
        let state = AppState::new(None);
        run(&state, ConsoleCommand::Start);
        run(&state, ConsoleCommand::Pause);

        match handle_command(&state, ConsoleCommand::Status).unwrap() {
            ConsoleResponse::Status(status) => {
                assert_eq!(status.controls, vec![Control::Resume, Control::Stop]);
                assert_eq!(status.last_action.as_deref(), Some("pause"));
                assert_eq!(status.timer.phase, Phase::Paused);
            }
            other => panic!("expected status response, got {:?}", other),
        }
    }

    #[test]
    fn test_status_reads_published_ticks() {
        let state = AppState::new(None);
        state.start().unwrap();
        for _ in 0..65 {
            state.tick().unwrap();
        }

        let status = status_handler(&state).unwrap();
        assert_eq!(status.timer, state.get_snapshot().unwrap());
        assert_eq!(status.timer.elapsed, "01:05");
        assert_eq!(status.controls, vec![Control::Pause, Control::Stop]);
    }

    #[test]
    fn test_quit_and_help() {
        let state = AppState::new(None);
        assert!(matches!(handle_command(&state, ConsoleCommand::Quit), Ok(ConsoleResponse::Quit)));
        assert!(matches!(handle_command(&state, ConsoleCommand::Help), Ok(ConsoleResponse::Help(_))));
    }
}
