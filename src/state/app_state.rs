//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Control, TimerMachine, TimerSnapshot};

/// Single owner of the timer machine; every operation goes through its mutex
#[derive(Debug)]
pub struct AppState {
    /// The pomodoro state machine
    pub machine: Arc<Mutex<TimerMachine>>,
    /// Program run on every phase boundary, if any
    pub notify_command: Option<String>,
    /// Process metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Fired whenever the phase changes, by command or by boundary crossing
    pub phase_change_tx: broadcast::Sender<TimerSnapshot>,
    /// Fired only when the clock itself crosses a phase boundary
    pub boundary_tx: broadcast::Sender<TimerSnapshot>,
    /// Latest snapshot after every operation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keeps the channel open and serves status reads without locking the machine
    pub snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with the machine in `Waiting`
    pub fn new(notify_command: Option<String>) -> Self {
        let (phase_change_tx, _) = broadcast::channel(100);
        let (boundary_tx, _) = broadcast::channel(16);
        let machine = TimerMachine::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());

        Self {
            machine: Arc::new(Mutex::new(machine)),
            notify_command,
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            phase_change_tx,
            boundary_tx,
            snapshot_tx,
            snapshot_rx,
        }
    }

    /// Apply a user command. Returns whether the machine changed, plus the new snapshot.
    pub fn apply(&self, control: Control) -> Result<(bool, TimerSnapshot), String> {
        let mut machine = self.machine.lock()
            .map_err(|e| format!("Failed to lock timer machine: {}", e))?;

        let before = machine.clone();
        match control {
            Control::Start => machine.start(),
            Control::Pause => machine.pause(),
            Control::Resume => machine.resume(),
            Control::Stop => machine.stop(),
        }
        let changed = *machine != before;
        let phase_changed = machine.current_phase() != before.current_phase();
        let snapshot = machine.snapshot();
        drop(machine); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(control.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        if changed {
            info!("{}: {} -> {}", control, before.current_phase(), snapshot.phase);
        } else {
            debug!("{} ignored in phase {}", control, snapshot.phase);
        }

        if phase_changed {
            self.notify_phase_change(&snapshot);
        }
        self.publish(&snapshot);

        Ok((changed, snapshot))
    }

    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.apply(Control::Start).map(|(_, snapshot)| snapshot)
    }

    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.apply(Control::Pause).map(|(_, snapshot)| snapshot)
    }

    pub fn resume(&self) -> Result<TimerSnapshot, String> {
        self.apply(Control::Resume).map(|(_, snapshot)| snapshot)
    }

    pub fn stop(&self) -> Result<TimerSnapshot, String> {
        self.apply(Control::Stop).map(|(_, snapshot)| snapshot)
    }

    /// Advance the machine by one second. The flag is true when a boundary was crossed.
    pub fn tick(&self) -> Result<(bool, TimerSnapshot), String> {
        let mut machine = self.machine.lock()
            .map_err(|e| format!("Failed to lock timer machine: {}", e))?;

        let crossed = machine.tick();
        let snapshot = machine.snapshot();
        drop(machine);

        if crossed {
            self.notify_phase_change(&snapshot);
            if self.boundary_tx.send(snapshot.clone()).is_err() {
                debug!("No listeners for boundary into {}", snapshot.phase);
            }
        }
        self.publish(&snapshot);

        Ok((crossed, snapshot))
    }

    /// Get the current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.machine.lock()
            .map(|machine| machine.snapshot())
            .map_err(|e| format!("Failed to lock timer machine: {}", e))
    }

    /// Subscribe to phase changes
    pub fn subscribe_phase_changes(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.phase_change_tx.subscribe()
    }

    /// Subscribe to boundary crossings made by the clock
    pub fn subscribe_boundaries(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.boundary_tx.subscribe()
    }

    /// Latest published snapshot, read without touching the machine lock
    pub fn latest_snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch the latest snapshot
    pub fn watch_timer(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn notify_phase_change(&self, snapshot: &TimerSnapshot) {
        // No subscribers just means the ticker has not started yet
        if self.phase_change_tx.send(snapshot.clone()).is_err() {
            debug!("No listeners for phase change to {}", snapshot.phase);
        }
    }

    fn publish(&self, snapshot: &TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
