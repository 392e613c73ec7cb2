//! Console response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Control, TimerSnapshot};

/// Response to a timer command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl CommandResponse {
    /// Create a new command response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// The command moved the timer
    pub fn changed(message: String, timer: TimerSnapshot) -> Self {
        Self::new("changed".to_string(), message, timer)
    }

    /// The command did not apply in the current phase
    pub fn unchanged(message: String, timer: TimerSnapshot) -> Self {
        Self::new("unchanged".to_string(), message, timer)
    }

    pub fn is_changed(&self) -> bool {
        self.status == "changed"
    }
}

/// Status report with the controls the user can use next
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub controls: Vec<Control>,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Announcement printed when the ticker crosses a phase boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

/// Anything the console can print
#[derive(Debug, Clone)]
pub enum ConsoleResponse {
    Command(CommandResponse),
    Status(StatusResponse),
    Boundary(BoundaryResponse),
    Help(&'static str),
    Quit,
}

impl ConsoleResponse {
    /// Render as a single line of text, or as JSON
    pub fn render(&self, json: bool) -> Result<String, String> {
        if json {
            let value = match self {
                ConsoleResponse::Command(response) => serde_json::to_string(response),
                ConsoleResponse::Status(response) => serde_json::to_string(response),
                ConsoleResponse::Boundary(response) => serde_json::to_string(response),
                ConsoleResponse::Help(text) => serde_json::to_string(&serde_json::json!({ "help": text })),
                ConsoleResponse::Quit => serde_json::to_string(&serde_json::json!({ "status": "quit" })),
            };
            return value.map_err(|e| format!("Failed to serialize response: {}", e));
        }

        Ok(match self {
            ConsoleResponse::Command(response) => {
                format!("[{}] {} | {}", response.status, response.message, response.timer.label())
            }
            ConsoleResponse::Status(response) => {
                let controls: Vec<&str> = response.controls.iter().map(|c| c.as_str()).collect();
                format!(
                    "{} | controls: {} | uptime {} | last action: {}",
                    response.timer.label(),
                    controls.join(", "),
                    response.uptime,
                    response.last_action.as_deref().unwrap_or("none"),
                )
            }
            ConsoleResponse::Boundary(response) => {
                format!("** {} | {}", response.message, response.timer.label())
            }
            ConsoleResponse::Help(text) => text.to_string(),
            ConsoleResponse::Quit => "bye".to_string(),
        })
    }
}
