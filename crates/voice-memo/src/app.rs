use crate::{AppCommand, AppError, AppResult, config::Config, presenter};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};
use voice_memo_core::{PermissionGate, PlaybackDispatcher, RecordingCatalog, RecordingSession};

/// Main application state.
///
/// Owns the permission gate, session, catalog and playback dispatcher and
/// applies one command at a time, so session transitions never overlap.
pub struct App {
    pub(crate) gate: PermissionGate,
    pub(crate) session: RecordingSession,
    pub(crate) catalog: RecordingCatalog,
    pub(crate) player: PlaybackDispatcher,
    pub(crate) config: Config,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voice-Memo starting");

        if let Some(notice) = presenter::permission_notice(self.gate.state()) {
            println!("{}", notice);
        }
        presenter::print_entries(&self.catalog, self.config.display.newest_first);
        presenter::print_toggle(self.session.state());

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(AppCommand::Shutdown) | None => {
                        info!("Shutdown requested");
                        break;
                    }
                    Some(command) => {
                        if let Err(e) = self.handle_command(command) {
                            warn!(error = %e, "Command failed");
                        }
                    }
                },

                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        error!(error = ?e, "Failed to listen for Ctrl-C");
                    }
                    info!("Interrupted");
                    break;
                }
            }
        }

        self.finish_capture();

        let _ = self.shutdown_tx.send(true);
        info!(
            recordings = self.catalog.len(),
            "Voice-Memo shut down successfully"
        );

        Ok(())
    }

    /// Apply one command. Failures leave every component as it was.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&mut self, command: AppCommand) -> AppResult<()> {
        match command {
            AppCommand::ToggleRecording => {
                let result = self.toggle_recording();
                presenter::print_toggle(self.session.state());
                result?;
            }
            AppCommand::List => {
                presenter::print_entries(&self.catalog, self.config.display.newest_first);
            }
            AppCommand::Play { number } => self.play(number)?,
            AppCommand::RequestPermission => {
                let state = self.gate.request();
                match presenter::permission_notice(state) {
                    Some(notice) => println!("{}", notice),
                    None => println!("microphone access granted"),
                }
            }
            AppCommand::Help => println!("{}", presenter::HELP),
            AppCommand::Shutdown => {}
        }

        Ok(())
    }

    fn toggle_recording(&mut self) -> AppResult<()> {
        if self.session.is_capturing() {
            let descriptor = self.session.stop()?;
            info!(recording_id = %descriptor.id(), "Recording saved");
            self.catalog.append(descriptor);
            presenter::print_entries(&self.catalog, self.config.display.newest_first);
        } else {
            self.session.start(&self.gate)?;
        }

        Ok(())
    }

    #[track_caller]
    fn play(&self, number: usize) -> AppResult<()> {
        let recording = number
            .checked_sub(1)
            .and_then(|index| self.catalog.get(index))
            .ok_or_else(|| AppError::UnknownRecording {
                number,
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.player.play(recording.storage())?;
        println!("playing {}", presenter::label(number));

        Ok(())
    }

    /// Stop a capture left running at shutdown so the microphone is released.
    fn finish_capture(&mut self) {
        if !self.session.is_capturing() {
            return;
        }

        match self.session.stop() {
            Ok(descriptor) => {
                info!(recording_id = %descriptor.id(), "Recording saved at shutdown");
                self.catalog.append(descriptor);
            }
            Err(e) => warn!(error = %e, "Capture in progress at shutdown was discarded"),
        }
    }
}
