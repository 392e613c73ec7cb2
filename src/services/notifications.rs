//! Phase-change notifications

use tokio::process::Command;
use tracing::{debug, info};

use crate::state::Phase;

/// Title passed to the notification program
pub const NOTIFICATION_TITLE: &str = "Pomodoro";

/// Message shown when the timer enters `phase`
pub fn notification_message(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Working => Some("You should start working."),
        Phase::Resting => Some("You can take a break now."),
        Phase::Waiting | Phase::Paused => None,
    }
}

/// Split a notification command line into program and leading arguments
pub fn split_command(command: &str) -> Result<Vec<String>, String> {
    let argv = shlex::split(command)
        .ok_or_else(|| format!("Invalid notification command: {}", command))?;
    if argv.is_empty() {
        return Err("Notification command is empty".to_string());
    }
    Ok(argv)
}

/// Announce a boundary crossing into `phase`.
///
/// The message is always logged. When `command` is set it is split like a
/// shell word list and run as `<command...> "Pomodoro" "<message>"`, which
/// fits `notify-send -u critical` and friends.
pub async fn notify_phase_change(phase: Phase, command: Option<&str>) -> Result<(), String> {
    let Some(message) = notification_message(phase) else {
        debug!("No notification for phase {}", phase);
        return Ok(());
    };

    info!("{}: {}", NOTIFICATION_TITLE, message);

    let Some(program) = command else {
        return Ok(());
    };

    let argv = split_command(program)?;
    debug!("Running notification command {:?}", argv);
    let output = Command::new(&argv[0])
        .args(&argv[1..])
        .args([NOTIFICATION_TITLE, message])
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr.trim()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(notification_message(Phase::Working), Some("You should start working."));
        assert_eq!(notification_message(Phase::Resting), Some("You can take a break now."));
        assert_eq!(notification_message(Phase::Waiting), None);
        assert_eq!(notification_message(Phase::Paused), None);
    }

    #[tokio::test]
    async fn test_log_only_notification() {
        assert!(notify_phase_change(Phase::Resting, None).await.is_ok());
        assert!(notify_phase_change(Phase::Paused, Some("/nonexistent/notifier")).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let result = notify_phase_change(Phase::Working, Some("/nonexistent/notifier")).await;
        assert!(result.unwrap_err().contains("/nonexistent/notifier"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_exit_status() {
        assert!(notify_phase_change(Phase::Working, Some("true")).await.is_ok());
        assert!(notify_phase_change(Phase::Working, Some("false")).await.is_err());
    }

    #[test]
    fn test_split_command() {
        assert_eq!(
            split_command("notify-send -u critical").unwrap(),
            vec!["notify-send", "-u", "critical"]
        );
        assert_eq!(split_command("sh -c 'exit 0'").unwrap(), vec!["sh", "-c", "exit 0"]);
        assert!(split_command("notify-send 'unterminated").is_err());
        assert!(split_command("   ").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_with_arguments() {
        // $0 and $1 receive the title and message
        let ok = notify_phase_change(Phase::Resting, Some(r#"sh -c 'test "$1" = "You can take a break now."'"#)).await;
        assert!(ok.is_ok());
        let failed = notify_phase_change(Phase::Working, Some("sh -c 'exit 3'")).await;
        assert!(failed.is_err());
    }
}
