//! Capability interfaces for the operating system audio stack.
//!
//! Each method is one suspension point: it blocks until the platform has
//! answered and reports the outcome through [`PlatformResult`]. Hosts that
//! drive the platform through callbacks or futures adapt them behind these
//! traits.

pub(crate) mod cpal_capture;
mod input_permission;
mod rodio_playback;

pub use {
    cpal_capture::CpalCaptureEngine, input_permission::InputDevicePermission,
    rodio_playback::RodioPlaybackEngine,
};

use crate::{PlatformResult, StorageRef};

/// Audio session mode applied before every capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    /// Whether the microphone may be opened.
    pub allows_recording: bool,
    /// Whether playback stays audible while the device is muted.
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Capture enabled, mixed with any playback that is running.
    pub const CAPTURE_WITH_PLAYBACK: Self = Self {
        allows_recording: true,
        plays_in_silent_mode: true,
    };
}

/// Fixed encoding parameters requested from the capture engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityPreset {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bits per stored sample.
    pub bits_per_sample: u16,
}

impl QualityPreset {
    /// The only preset used for captures.
    pub const HIGH_QUALITY: Self = Self {
        sample_rate: 44_100,
        channels: 2,
        bits_per_sample: 16,
    };
}

/// OS microphone-consent service.
pub trait PermissionService {
    /// Ask the platform for microphone access. May show a consent prompt.
    ///
    /// Returns `Ok(false)` on an explicit denial and `Err` when the query
    /// itself could not be made.
    fn request_access(&self) -> PlatformResult<bool>;
}

/// OS capture engine.
pub trait CaptureEngine {
    /// Apply an audio session mode ahead of a capture.
    fn configure(&mut self, mode: AudioMode) -> PlatformResult<()>;

    /// Open the microphone and begin writing a new capture.
    fn begin_capture(&mut self, preset: QualityPreset) -> PlatformResult<Box<dyn CaptureHandle>>;
}

/// A live capture. Owns the microphone until finalized or dropped.
pub trait CaptureHandle {
    /// Stop capturing, release the microphone and return where the audio
    /// was stored, or `None` if nothing was recorded.
    ///
    /// The device is released on every path, including `Err`.
    fn finalize(self: Box<Self>) -> PlatformResult<Option<StorageRef>>;
}

/// OS playback engine.
pub trait PlaybackEngine {
    /// Open and decode a stored recording.
    fn open(&self, storage: &StorageRef) -> PlatformResult<Box<dyn PlaybackResource>>;
}

/// A decoded recording ready to be played once.
pub trait PlaybackResource {
    /// Start playback and return without waiting for it to finish.
    ///
    /// The resource is released by the platform when playback ends.
    fn play(self: Box<Self>) -> PlatformResult<()>;
}
