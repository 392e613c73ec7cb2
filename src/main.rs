//! Pomodoro Indicator - a terminal pomodoro timer
//!
//! This is the main entry point for the pomodoro-indicator application.

use std::sync::Arc;
use tracing::{error, info};

use pomodoro_indicator::{
    config::Config,
    console::console_loop,
    services::split_command,
    state::{AppState, RESTING_MAX_SECONDS, WORKING_MAX_SECONDS},
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries console responses
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_indicator={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pomodoro-indicator v{}", env!("CARGO_PKG_VERSION"));
    info!("Intervals: work={}min, rest={}min, notify={}",
          WORKING_MAX_SECONDS / 60, RESTING_MAX_SECONDS / 60,
          config.notify_command.as_deref().unwrap_or("log only"));

    // Reject a malformed notification command before the first boundary
    if let Some(command) = config.notify_command.as_deref() {
        split_command(command).map_err(anyhow::Error::msg)?;
    }

    // Create application state
    let state = Arc::new(AppState::new(config.notify_command.clone()));

    // Start the per-second ticker
    let ticker_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    if config.autostart {
        state.start().map_err(anyhow::Error::msg)?;
    }

    tokio::select! {
        result = console_loop(Arc::clone(&state), config.json) => {
            if let Err(e) = result {
                error!("Console error: {}", e);
            }
        }
        _ = wait_for_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Ticks are synchronous, so there is nothing in flight to wait for
    ticker.abort();

    info!("Shutdown complete");
    Ok(())
}

/// Resolve on SIGTERM/SIGINT/SIGHUP; never resolve if handlers cannot be installed
async fn wait_for_signal() {
    if let Err(e) = shutdown_signal().await {
        error!("{}", e);
        std::future::pending::<()>().await;
    }
}
