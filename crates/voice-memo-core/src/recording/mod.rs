mod catalog;
mod descriptor;
mod permission;
mod playback;
mod session;

pub use {
    catalog::RecordingCatalog,
    descriptor::{RecordingDescriptor, StorageRef},
    permission::{PermissionGate, PermissionState},
    playback::PlaybackDispatcher,
    session::{RecordingSession, SessionState},
};
