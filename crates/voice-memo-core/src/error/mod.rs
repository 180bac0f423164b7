use error_location::ErrorLocation;
use thiserror::Error;

/// Failures reported by the platform audio capabilities.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Audio device could not be opened, configured or driven.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording storage could not be created, written or read.
    #[error("Storage error: {reason} {location}")]
    StorageError {
        /// Description of the storage error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stored audio could not be decoded.
    #[error("Decode error: {reason} {location}")]
    DecodeError {
        /// Description of the decode error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Reasons a capture could not be started.
///
/// The session is left exactly as it was before the call.
#[derive(Error, Debug)]
pub enum StartError {
    /// Microphone access has not been granted.
    #[error("Microphone permission not granted {location}")]
    PermissionDenied {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A capture is already in progress.
    #[error("A capture is already in progress {location}")]
    AlreadyCapturing {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture engine refused the audio mode or the capture itself.
    #[error("Failed to acquire capture engine: {source} {location}")]
    EngineAcquisitionFailed {
        /// Underlying platform error.
        #[source]
        source: PlatformError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Reasons a capture could not be turned into a recording.
///
/// Whatever the variant, the session is Idle afterwards and the capture
/// handle has been released.
#[derive(Error, Debug)]
pub enum StopError {
    /// No capture is in progress.
    #[error("No capture in progress {location}")]
    NotCapturing {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture finished without producing any audio.
    #[error("Capture produced no audio {location}")]
    NoCaptureProduced {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture engine failed while finalizing the capture.
    #[error("Failed to finalize capture: {source} {location}")]
    FinalizeFailed {
        /// Underlying platform error.
        #[source]
        source: PlatformError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Reasons a recording could not be played.
#[derive(Error, Debug)]
pub enum PlayError {
    /// The playback engine could not open, decode or start the recording.
    #[error("Playback failed: {source} {location}")]
    PlaybackEngineFailed {
        /// Underlying platform error.
        #[source]
        source: PlatformError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`PlatformError`].
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Result type alias using [`StartError`].
pub type StartResult<T> = std::result::Result<T, StartError>;

/// Result type alias using [`StopError`].
pub type StopResult<T> = std::result::Result<T, StopError>;

/// Result type alias using [`PlayError`].
pub type PlayResult<T> = std::result::Result<T, PlayError>;
