//! Terminal rendering of the recording list and the record toggle.

use voice_memo_core::{PermissionState, RecordingCatalog, SessionState};

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Toggle color while idle.
pub(crate) const RECORD_COLOR: &str = "#007AFF";
/// Toggle color while capturing.
pub(crate) const STOP_COLOR: &str = "#FF3B30";

pub(crate) const HELP: &str = "\
commands:
  r, record      start or stop recording
  l, list        show recordings
  p N, play N    play Recording N
  a, allow       ask for microphone access again
  h, help        show this help
  q, quit        exit";

/// Visual state of the record toggle, mirroring the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleControl {
    /// Session state the control reflects.
    pub state: SessionState,
    /// Icon name.
    pub icon: &'static str,
    /// Background color.
    pub color: &'static str,
}

impl From<SessionState> for ToggleControl {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self {
                state,
                icon: "mic",
                color: RECORD_COLOR,
            },
            SessionState::Capturing => Self {
                state,
                icon: "stop",
                color: STOP_COLOR,
            },
        }
    }
}

impl fmt::Display for ToggleControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SessionState::Capturing => write!(f, "[{}] recording... (r to stop)", self.icon),
            SessionState::Idle => write!(f, "[{}] ready (r to record)", self.icon),
        }
    }
}

/// One rendered row of the recordings list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// "Recording N", N being the 1-based insertion position.
    pub label: String,
    /// Local wall-clock time the recording was finished.
    pub time: String,
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14} {}", self.label, self.time)
    }
}

/// Rows for every recording. Labels follow insertion order regardless of
/// the display order.
pub(crate) fn render_entries(catalog: &RecordingCatalog, newest_first: bool) -> Vec<EntryView> {
    let mut entries: Vec<EntryView> = catalog
        .iter()
        .enumerate()
        .map(|(index, recording)| EntryView {
            label: label(index + 1),
            time: format_time(recording.created_at(), &Local),
        })
        .collect();

    if newest_first {
        entries.reverse();
    }

    entries
}

pub(crate) fn label(number: usize) -> String {
    format!("Recording {}", number)
}

/// `h:mm:ss AM/PM` in the given zone.
pub(crate) fn format_time<Tz>(created_at: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    created_at
        .with_timezone(zone)
        .format("%-I:%M:%S %p")
        .to_string()
}

pub(crate) fn permission_notice(state: PermissionState) -> Option<&'static str> {
    match state {
        PermissionState::Granted => None,
        PermissionState::Unknown => Some("microphone access not requested yet (a to ask)"),
        PermissionState::Denied => Some("microphone access denied (a to ask again)"),
    }
}

pub(crate) fn print_toggle(state: SessionState) {
    println!("{}", ToggleControl::from(state));
}

pub(crate) fn print_entries(catalog: &RecordingCatalog, newest_first: bool) {
    println!("Your Recordings");
    let entries = render_entries(catalog, newest_first);
    if entries.is_empty() {
        println!("  (none yet)");
    }
    for entry in entries {
        println!("  {}", entry);
    }
}
