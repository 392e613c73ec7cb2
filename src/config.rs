//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-indicator")]
#[command(about = "A terminal pomodoro timer: 25 minutes of work, 5 minutes of rest")]
#[command(version)]
pub struct Config {
    /// Start a work interval right away instead of waiting for `start`
    #[arg(short, long)]
    pub autostart: bool,

    /// Print responses as JSON, one object per line
    #[arg(short, long)]
    pub json: bool,

    /// Command run on every phase boundary as `<command...> <title> <message>`,
    /// split like a shell word list, e.g. "notify-send -u critical"
    #[arg(short, long, value_name = "COMMAND")]
    pub notify_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro-indicator"]).unwrap();
        assert!(!config.autostart);
        assert!(!config.json);
        assert_eq!(config.notify_command, None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "pomodoro-indicator", "-a", "--json", "-v", "--notify-command", "notify-send -u critical",
        ]).unwrap();
        assert!(config.autostart);
        assert!(config.json);
        assert_eq!(config.notify_command.as_deref(), Some("notify-send -u critical"));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_no_interval_flags() {
        assert!(Config::try_parse_from(["pomodoro-indicator", "--work", "50"]).is_err());
    }
}
