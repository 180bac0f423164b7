//! Voice-Memo: record short audio clips, list them and play them back.

mod app;
mod app_command;
mod config;
mod error;
mod input_handler;
mod presenter;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    input_handler::InputHandler,
};

use crate::config::Config;

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use voice_memo_core::{
    PermissionGate, PermissionState, PlaybackDispatcher, RecordingCatalog, RecordingSession,
    platform::{CpalCaptureEngine, InputDevicePermission, RodioPlaybackEngine},
};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "voice_memo=debug,voice_memo_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // Asked once at startup; the user can ask again with the allow command.
    let mut gate = PermissionGate::new(Box::new(InputDevicePermission::new()));
    if gate.request() != PermissionState::Granted {
        warn!("Microphone access not granted, recording disabled");
    }

    let session = RecordingSession::new(Box::new(CpalCaptureEngine::new(
        &config.storage.recordings_dir,
    )));
    let player = PlaybackDispatcher::new(Box::new(RodioPlaybackEngine::new()));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    rt.block_on(async {
        let input_handler = InputHandler::new(command_tx);

        let app = App {
            gate,
            session,
            catalog: RecordingCatalog::new(),
            player,
            config,
            command_rx,
            shutdown_tx,
        };

        tokio::join!(
            async {
                if let Err(e) = input_handler.run(shutdown_rx).await {
                    error!(error = ?e, "Input handler error");
                }
            },
            async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            }
        );
    });

    // The stdin reader may still be blocked in a read.
    rt.shutdown_timeout(Duration::from_secs(1));
}
