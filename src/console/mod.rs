//! Console module
//!
//! Reads timer commands line by line, prints one response per line, and
//! announces phase boundaries as the ticker crosses them.

pub mod commands;
pub mod responses;

use std::{io::BufRead, sync::Arc};
use chrono::Utc;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream},
    runtime::Handle,
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info, warn};

use crate::{services::notification_message, state::AppState};
pub use commands::{handle_command, ConsoleCommand, HELP_TEXT};
pub use responses::{BoundaryResponse, CommandResponse, ConsoleResponse, StatusResponse};

/// Run the console on stdin/stdout until EOF or `quit`
pub async fn console_loop(state: Arc<AppState>, json: bool) -> Result<(), String> {
    let stdin = BufReader::new(spawn_stdin_reader()?);
    let stdout = tokio::io::stdout();
    run_console(state, stdin, stdout, json).await
}

/// Forward stdin into an in-memory pipe from a detached thread.
///
/// A blocked read on that thread never holds up runtime shutdown, unlike
/// `tokio::io::stdin`, whose blocking-pool read is awaited when the runtime drops.
fn spawn_stdin_reader() -> Result<DuplexStream, String> {
    let (reader, mut writer) = tokio::io::duplex(4096);
    let runtime = Handle::current();

    std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                let forwarded = runtime.block_on(async {
                    writer.write_all(line.as_bytes()).await?;
                    writer.write_all(b"\n").await
                });
                if forwarded.is_err() {
                    // Console is gone
                    break;
                }
            }
            debug!("Stdin reader finished");
        })
        .map_err(|e| format!("Failed to spawn stdin reader: {}", e))?;

    Ok(reader)
}

/// Drive the console over any line reader and writer
pub async fn run_console<R, W>(state: Arc<AppState>, reader: R, mut writer: W, json: bool) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Console ready ({})", HELP_TEXT);

    let mut lines = reader.lines();
    let mut boundary_rx = state.subscribe_boundaries();

    loop {
        tokio::select! {
            // Announce a boundary before handling the next command
            biased;

            received = boundary_rx.recv() => {
                match received {
                    Ok(timer) => {
                        let message = notification_message(timer.phase).unwrap_or_default().to_string();
                        let response = ConsoleResponse::Boundary(BoundaryResponse {
                            message,
                            timestamp: Utc::now(),
                            timer,
                        });
                        write_line(&mut writer, &response.render(json)?).await?;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Console missed {} boundary announcements", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            line = lines.next_line() => {
                let line = line.map_err(|e| format!("Failed to read command: {}", e))?;
                let Some(line) = line else {
                    debug!("Console input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let response = match line.parse::<ConsoleCommand>() {
                    Ok(command) => handle_command(&state, command)?,
                    Err(e) => {
                        warn!("{}", e);
                        write_line(&mut writer, &format!("error: {}", e)).await?;
                        continue;
                    }
                };

                write_line(&mut writer, &response.render(json)?).await?;
                if matches!(response, ConsoleResponse::Quit) {
                    break;
                }
            }
        }
    }

    writer.flush().await.map_err(|e| format!("Failed to flush output: {}", e))?;
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<(), String> {
    writer.write_all(line.as_bytes()).await
        .map_err(|e| format!("Failed to write output: {}", e))?;
    writer.write_all(b"\n").await
        .map_err(|e| format!("Failed to write output: {}", e))?;
    writer.flush().await.map_err(|e| format!("Failed to flush output: {}", e))
}
