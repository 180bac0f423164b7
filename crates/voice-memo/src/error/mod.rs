use voice_memo_core::{PlayError, StartError, StopError};

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the voice-memo binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// A capture could not be started.
    #[error("Failed to start recording: {source} {location}")]
    Start {
        /// The underlying session error.
        #[source]
        source: StartError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A capture could not be stopped into a recording.
    #[error("Failed to stop recording: {source} {location}")]
    Stop {
        /// The underlying session error.
        #[source]
        source: StopError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A recording could not be played.
    #[error("Failed to play recording: {source} {location}")]
    Play {
        /// The underlying playback error.
        #[source]
        source: PlayError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// No recording carries the requested label number.
    #[error("No recording numbered {number} {location}")]
    UnknownRecording {
        /// The 1-based label number that was requested.
        number: usize,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Input line did not parse as a command.
    #[error("Unrecognised command: {input:?} {location}")]
    InvalidCommand {
        /// The offending input.
        input: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From impls with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<StartError> for AppError {
    #[track_caller]
    fn from(source: StartError) -> Self {
        AppError::Start {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StopError> for AppError {
    #[track_caller]
    fn from(source: StopError) -> Self {
        AppError::Stop {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<PlayError> for AppError {
    #[track_caller]
    fn from(source: PlayError) -> Self {
        AppError::Play {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
