use crate::{PlayError, PlayResult, StorageRef, platform::PlaybackEngine};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Starts playback of stored recordings.
///
/// Holds no per-call state: every [`PlaybackDispatcher::play`] acquires its
/// own playback resource, so overlapping calls are independent.
pub struct PlaybackDispatcher {
    engine: Box<dyn PlaybackEngine>,
}

impl PlaybackDispatcher {
    /// Create a dispatcher over a playback engine.
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self { engine }
    }

    /// Open `storage` and start playing it. Returns once playback has
    /// started; completion is not observed.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::PlaybackEngineFailed`] if the recording cannot
    /// be opened, decoded or started.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn play(&self, storage: &StorageRef) -> PlayResult<()> {
        let resource =
            self.engine
                .open(storage)
                .map_err(|source| PlayError::PlaybackEngineFailed {
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;

        resource
            .play()
            .map_err(|source| PlayError::PlaybackEngineFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(storage = %storage, "Playback dispatched");

        Ok(())
    }
}

impl fmt::Debug for PlaybackDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackDispatcher").finish_non_exhaustive()
    }
}
