use crate::{
    PlatformError, PlatformResult, StorageRef,
    platform::{PlaybackEngine, PlaybackResource},
};

use std::{
    fs::File,
    io::BufReader,
    panic::Location,
    path::PathBuf,
    sync::mpsc,
    thread,
};

use error_location::ErrorLocation;
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, info, instrument};

/// Plays stored recordings on the default output device.
#[derive(Debug, Default)]
pub struct RodioPlaybackEngine;

impl RodioPlaybackEngine {
    /// Create a playback engine backed by the default rodio output.
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackEngine for RodioPlaybackEngine {
    #[track_caller]
    #[instrument(skip(self))]
    fn open(&self, storage: &StorageRef) -> PlatformResult<Box<dyn PlaybackResource>> {
        let path = storage.to_path();

        let file = File::open(&path).map_err(|e| PlatformError::StorageError {
            reason: format!("Failed to open {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlatformError::DecodeError {
            reason: format!("Failed to decode {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(path = ?path, "Recording decoded");

        let resource: Box<dyn PlaybackResource> = Box::new(RodioPlaybackResource { source, path });
        Ok(resource)
    }
}

/// A decoded file waiting to be handed to an output sink.
struct RodioPlaybackResource {
    source: Decoder<BufReader<File>>,
    path: PathBuf,
}

impl PlaybackResource for RodioPlaybackResource {
    #[track_caller]
    fn play(self: Box<Self>) -> PlatformResult<()> {
        let RodioPlaybackResource { source, path } = *self;
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
        let thread_path = path.clone();

        // The output stream is not Send, so it is opened on the thread that
        // keeps it alive until the clip ends.
        thread::Builder::new()
            .name("playback".to_string())
            .spawn(move || {
                let (_stream, stream_handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("Failed to open output: {}", e)));
                        return;
                    }
                };

                let sink = match Sink::try_new(&stream_handle) {
                    Ok(sink) => sink,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("Failed to create sink: {}", e)));
                        return;
                    }
                };

                sink.append(source);
                let _ = ready_tx.send(Ok(()));

                sink.sleep_until_end();
                debug!(path = ?thread_path, "Playback finished");
            })
            .map_err(|e| PlatformError::DeviceError {
                reason: format!("Failed to spawn playback thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!(path = ?path, "Playback started");
                Ok(())
            }
            Ok(Err(reason)) => Err(PlatformError::DeviceError {
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(PlatformError::DeviceError {
                reason: "Playback thread exited before starting".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
