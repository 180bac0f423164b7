use crate::platform::PermissionService;

use std::fmt;

use tracing::{info, instrument, warn};

/// Last known answer to the microphone-access question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Never requested.
    #[default]
    Unknown,
    /// Access granted.
    Granted,
    /// Access denied, or the platform query failed.
    Denied,
}

/// Obtains and caches microphone access.
///
/// The cached state only changes when [`PermissionGate::request`] is called;
/// a denial is never re-queried on its own.
pub struct PermissionGate {
    service: Box<dyn PermissionService>,
    state: PermissionState,
}

impl PermissionGate {
    /// Create a gate in the [`PermissionState::Unknown`] state.
    pub fn new(service: Box<dyn PermissionService>) -> Self {
        Self {
            service,
            state: PermissionState::Unknown,
        }
    }

    /// Query the platform and cache the answer.
    ///
    /// Blocks until the platform responds. A failed query is reported as
    /// [`PermissionState::Denied`]; recording simply stays unavailable.
    #[instrument(skip(self))]
    pub fn request(&mut self) -> PermissionState {
        self.state = match self.service.request_access() {
            Ok(true) => PermissionState::Granted,
            Ok(false) => PermissionState::Denied,
            Err(e) => {
                warn!(error = ?e, "Permission query failed, treating as denied");
                PermissionState::Denied
            }
        };

        info!(state = %self.state, "Microphone permission resolved");

        self.state
    }

    /// Whether the last request was granted. False before any request.
    pub fn is_granted(&self) -> bool {
        self.state == PermissionState::Granted
    }

    /// Last known state.
    pub fn state(&self) -> PermissionState {
        self.state
    }
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGate")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PermissionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
