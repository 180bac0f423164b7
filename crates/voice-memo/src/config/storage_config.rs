use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where finished recordings are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory receiving one WAV file per recording.
    pub recordings_dir: PathBuf,
}
