use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Opaque reference to where a finished recording's audio lives.
///
/// Never empty: construction rejects blank references, so a catalog can
/// only ever hold resolvable storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageRef(String);

impl StorageRef {
    /// Wrap a platform storage reference. Returns `None` for a blank one.
    pub fn new<S: Into<String>>(reference: S) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(Self(reference))
        }
    }

    /// Reference a file on the local filesystem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        Self::new(path.as_ref().to_string_lossy().into_owned())
    }

    /// The raw reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the reference as a filesystem path.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finished recording. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingDescriptor {
    id: Uuid,
    storage: StorageRef,
    created_at: DateTime<Utc>,
}

impl RecordingDescriptor {
    /// Stamp a finalized capture with the current time.
    pub(crate) fn new(id: Uuid, storage: StorageRef) -> Self {
        Self {
            id,
            storage,
            created_at: Utc::now(),
        }
    }

    /// Capture id the recording was produced under.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Where the audio is stored.
    pub fn storage(&self) -> &StorageRef {
        &self.storage
    }

    /// When the capture was finalized.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
