//! Single-slot capture state machine.
//!
//! ```text
//! Idle --start()--> Capturing --stop()--> Idle
//! ```
//!
//! `start` and `stop` take `&mut self`, so calls against one session are
//! serialized by whoever owns it. Nothing inside the session guards against
//! two owners racing through a shared lock; callers keep one transition in
//! flight at a time.

use crate::{
    PermissionGate, RecordingDescriptor, StartError, StartResult, StopError, StopResult,
    platform::{AudioMode, CaptureEngine, CaptureHandle, QualityPreset},
};

use std::{fmt, panic::Location, time::Instant};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Observable state of a [`RecordingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No capture in progress.
    #[default]
    Idle,
    /// Exactly one capture in progress.
    Capturing,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The in-flight capture. Present exactly while Capturing.
struct ActiveCapture {
    handle: Box<dyn CaptureHandle>,
    capture_id: Uuid,
    started_at: Instant,
}

/// Owns the capture engine and at most one live capture.
pub struct RecordingSession {
    engine: Box<dyn CaptureEngine>,
    active: Option<ActiveCapture>,
}

impl RecordingSession {
    /// Create an Idle session over a capture engine.
    pub fn new(engine: Box<dyn CaptureEngine>) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    /// Begin a capture.
    ///
    /// # Errors
    ///
    /// - [`StartError::PermissionDenied`] if `gate` has not granted access.
    /// - [`StartError::AlreadyCapturing`] if a capture is in progress; that
    ///   capture is left untouched.
    /// - [`StartError::EngineAcquisitionFailed`] if the engine rejects the
    ///   audio mode or cannot open the microphone.
    ///
    /// On every error the session state is unchanged.
    #[track_caller]
    #[instrument(skip(self, gate))]
    pub fn start(&mut self, gate: &PermissionGate) -> StartResult<()> {
        if !gate.is_granted() {
            return Err(StartError::PermissionDenied {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(active) = &self.active {
            debug!(capture_id = %active.capture_id, "Start ignored, already capturing");
            return Err(StartError::AlreadyCapturing {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.engine
            .configure(AudioMode::CAPTURE_WITH_PLAYBACK)
            .map_err(|source| StartError::EngineAcquisitionFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let handle = self
            .engine
            .begin_capture(QualityPreset::HIGH_QUALITY)
            .map_err(|source| StartError::EngineAcquisitionFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let capture_id = Uuid::new_v4();
        self.active = Some(ActiveCapture {
            handle,
            capture_id,
            started_at: Instant::now(),
        });

        info!(capture_id = %capture_id, "Capture started");

        Ok(())
    }

    /// Finish the capture and describe the resulting recording.
    ///
    /// The capture handle is released and the session returns to Idle
    /// whether or not this succeeds.
    ///
    /// # Errors
    ///
    /// - [`StopError::NotCapturing`] if the session is Idle.
    /// - [`StopError::FinalizeFailed`] if the engine fails while finalizing.
    /// - [`StopError::NoCaptureProduced`] if the capture holds no audio.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> StopResult<RecordingDescriptor> {
        let ActiveCapture {
            handle,
            capture_id,
            started_at,
        } = self.active.take().ok_or_else(|| StopError::NotCapturing {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let duration = started_at.elapsed();

        // Consumes the handle: it is released here on every path below.
        let storage = handle.finalize().map_err(|source| {
            warn!(capture_id = %capture_id, error = ?source, "Capture finalize failed");
            StopError::FinalizeFailed {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let Some(storage) = storage else {
            warn!(capture_id = %capture_id, "Capture produced no audio");
            return Err(StopError::NoCaptureProduced {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        info!(
            capture_id = %capture_id,
            duration_ms = duration.as_millis(),
            storage = %storage,
            "Capture stopped"
        );

        Ok(RecordingDescriptor::new(capture_id, storage))
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Capturing
        } else {
            SessionState::Idle
        }
    }

    /// Whether a capture is in progress.
    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the capture in progress, if any.
    pub fn capture_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|active| active.capture_id)
    }
}

impl fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSession")
            .field("state", &self.state())
            .field("capture_id", &self.capture_id())
            .finish_non_exhaustive()
    }
}
