use crate::{PlatformResult, platform::PermissionService};

use cpal::traits::HostTrait;
use tracing::{info, instrument, warn};

/// Microphone access on desktop hosts.
///
/// Desktop platforms grant access per device rather than through an
/// in-process prompt, so access is granted exactly when the default host
/// exposes a default input device.
#[derive(Debug, Default)]
pub struct InputDevicePermission;

impl InputDevicePermission {
    /// Create a permission service backed by the default CPAL host.
    pub fn new() -> Self {
        Self
    }
}

impl PermissionService for InputDevicePermission {
    #[instrument(skip(self))]
    fn request_access(&self) -> PlatformResult<bool> {
        let host = cpal::default_host();

        match host.default_input_device() {
            Some(_) => {
                info!(host = ?host.id(), "Default input device available");
                Ok(true)
            }
            None => {
                warn!(host = ?host.id(), "No default input device");
                Ok(false)
            }
        }
    }
}
