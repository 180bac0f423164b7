use crate::{AppError, AppResult};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Commands sent from the input handler to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a capture when idle, stop it when capturing.
    ToggleRecording,
    /// Show the recordings list.
    List,
    /// Play the recording labelled "Recording {number}".
    Play {
        /// 1-based label number.
        number: usize,
    },
    /// Ask the platform for microphone access again.
    RequestPermission,
    /// Show the command reference.
    Help,
    /// Request application shutdown.
    Shutdown,
}

impl FromStr for AppCommand {
    type Err = AppError;

    #[track_caller]
    fn from_str(input: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidCommand {
            input: input.to_string(),
            location: ErrorLocation::from(Location::caller()),
        };

        let mut words = input.split_whitespace();
        let verb = words.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let argument = words.next();

        if words.next().is_some() {
            return Err(invalid());
        }

        let command = match (verb.as_str(), argument) {
            ("r" | "record" | "toggle", None) => AppCommand::ToggleRecording,
            ("l" | "ls" | "list", None) => AppCommand::List,
            ("p" | "play", Some(number)) => match number.parse::<usize>() {
                Ok(number) if number > 0 => AppCommand::Play { number },
                _ => return Err(invalid()),
            },
            ("a" | "allow", None) => AppCommand::RequestPermission,
            ("h" | "help" | "?", None) => AppCommand::Help,
            ("q" | "quit" | "exit", None) => AppCommand::Shutdown,
            _ => return Err(invalid()),
        };

        Ok(command)
    }
}
