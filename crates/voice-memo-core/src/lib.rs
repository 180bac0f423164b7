//! Voice-memo Core Library
//!
//! Recording session lifecycle and recordings catalog for a voice-memo app:
//! microphone permission, a single-slot capture state machine, an in-memory
//! ordered catalog of finished recordings and fire-and-forget playback.
//!
//! The operating system audio stack is consumed through the capability
//! traits in [`platform`]. Desktop adapters built on CPAL, hound and rodio
//! are provided; tests and other hosts supply their own.
//!
//! # Example
//!
//! ```no_run
//! use voice_memo_core::{
//!     PermissionGate, PlaybackDispatcher, RecordingCatalog, RecordingSession,
//!     platform::{CpalCaptureEngine, InputDevicePermission, RodioPlaybackEngine},
//! };
//!
//! use std::{thread::sleep, time::Duration};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut gate = PermissionGate::new(Box::new(InputDevicePermission::new()));
//!     gate.request();
//!
//!     let mut session = RecordingSession::new(Box::new(CpalCaptureEngine::new("recordings")));
//!     let mut catalog = RecordingCatalog::new();
//!     let player = PlaybackDispatcher::new(Box::new(RodioPlaybackEngine::new()));
//!
//!     session.start(&gate)?;
//!     sleep(Duration::from_secs(3));
//!     catalog.append(session.stop()?);
//!
//!     if let Some(recording) = catalog.list().last() {
//!         player.play(recording.storage())?;
//!     }
//!     Ok(())
//! }
//! ```

mod error;
pub mod platform;
mod recording;

pub use {
    error::{
        PlatformError, PlatformResult, PlayError, PlayResult, StartError, StartResult, StopError,
        StopResult,
    },
    recording::{
        PermissionGate, PermissionState, PlaybackDispatcher, RecordingCatalog,
        RecordingDescriptor, RecordingSession, SessionState, StorageRef,
    },
};

#[cfg(test)]
mod tests;
