//! Per-second ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::{
    services::notify_phase_change,
    state::{AppState, Phase, TimerSnapshot},
};

/// Wall-clock period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while a phase is running
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut phase_rx = state.subscribe_phase_changes();

    // Pick up anything applied before we subscribed
    let mut current = match state.get_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read timer state: {}", e);
            return;
        }
    };

    loop {
        if current.phase.is_running() {
            match run_clock(&state, &mut phase_rx).await {
                Some(snapshot) => current = snapshot,
                None => break,
            }
            continue;
        }

        debug!("Ticker parked in phase {}", current.phase);
        match phase_rx.recv().await {
            Ok(snapshot) => current = snapshot,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Ticker missed {} phase changes, resyncing", skipped);
                match state.get_snapshot() {
                    Ok(snapshot) => current = snapshot,
                    Err(e) => {
                        error!("Failed to read timer state: {}", e);
                        break;
                    }
                }
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!("Ticker task stopped");
}

/// Tick until a command moves the machine out of a running phase.
///
/// Returns the snapshot that stopped the clock, or `None` if the task should exit.
async fn run_clock(
    state: &AppState,
    phase_rx: &mut broadcast::Receiver<TimerSnapshot>,
) -> Option<TimerSnapshot> {
    debug!("Ticker running");

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick() {
                    Ok((true, snapshot)) => {
                        info!("Phase boundary crossed, now {}", snapshot.phase);
                        spawn_notification(snapshot.phase, state.notify_command.clone());
                    }
                    Ok((false, snapshot)) => {
                        debug!("Tick: {}", snapshot.label());
                    }
                    Err(e) => {
                        error!("Failed to tick timer: {}", e);
                        return None;
                    }
                }
            }

            received = phase_rx.recv() => {
                match received {
                    Ok(snapshot) if !snapshot.phase.is_running() => {
                        debug!("Ticker stopped by phase {}", snapshot.phase);
                        return Some(snapshot);
                    }
                    // Our own boundary crossings come back through the channel
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Ticker missed {} phase changes, resyncing", skipped);
                        match state.get_snapshot() {
                            Ok(snapshot) if !snapshot.phase.is_running() => return Some(snapshot),
                            Ok(_) => {}
                            Err(e) => {
                                error!("Failed to read timer state: {}", e);
                                return None;
                            }
                        }
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
    }
}

/// Run the notifier off the clock so a slow command never delays a tick
fn spawn_notification(phase: Phase, command: Option<String>) {
    tokio::spawn(async move {
        if let Err(e) = notify_phase_change(phase, command.as_deref()).await {
            error!("Failed to send notification: {}", e);
        }
    });
}
