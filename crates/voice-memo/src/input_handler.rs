//! Line-oriented command input.
//!
//! Reads commands from stdin on a blocking task and forwards them to the
//! main application over an async channel.

use crate::{AppCommand, AppError, AppResult, presenter};

use std::{
    io::{self, BufRead},
    panic::Location,
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Turns input lines into [`AppCommand`]s.
pub struct InputHandler {
    command_tx: mpsc::Sender<AppCommand>,
}

impl InputHandler {
    /// Create a handler that forwards commands to `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Run the input loop until shutdown is signalled or input ends.
    ///
    /// End of input is forwarded as [`AppCommand::Shutdown`].
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let (line_tx, mut line_rx) = mpsc::channel::<String>(32);

        // Single persistent blocking task that forwards stdin lines.
        //
        // Shutdown: when line_rx is dropped (loop breaks), the next
        // line_tx.blocking_send() fails, breaking the blocking loop.
        let handle = tokio::task::spawn_blocking(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input");
                        break;
                    }
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Input handler shutting down");
                    break;
                }
                line = line_rx.recv() => match line {
                    Some(line) => self.handle_line(&line).await?,
                    None => {
                        info!("End of input");
                        self.send(AppCommand::Shutdown).await?;
                        break;
                    }
                }
            }
        }

        drop(line_rx);

        // Best-effort join: the blocking task may be stuck reading stdin.
        // The task is cleaned up by the runtime on process exit regardless.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Input forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Input forwarder task panicked"),
            Err(_) => debug!(
                "Input forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Parse one input line and forward it. Blank lines are ignored and
    /// unrecognised ones reported without failing the loop.
    #[instrument(skip(self))]
    pub(crate) async fn handle_line(&self, line: &str) -> AppResult<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        match line.parse::<AppCommand>() {
            Ok(command) => self.send(command).await,
            Err(e) => {
                warn!(error = %e, "Ignoring input");
                println!("{}", presenter::HELP);
                Ok(())
            }
        }
    }

    async fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
