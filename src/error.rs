//! Error types shared by the parsers and the status adapter.
use std::io;
use thiserror::Error;

/// Message returned to clients whenever battery status can not be produced.
pub const BATTERY_ERROR_MESSAGE: &str = "500 - Unable to retrieve battery status";
/// Message returned to clients whenever wifi status can not be produced.
pub const WIFI_ERROR_MESSAGE: &str = "500 - Unable to retrieve wifi status";

#[derive(Debug, Error, PartialEq, Eq)]
/// Structural failure while parsing command output.
///
/// Missing fields are *not* errors, parsers return partial records for them.
pub enum ParseError {
    /// A `Cell` line without the `-` separating its identifier from its first field.
    #[error("cell line without separator: '{0}'")]
    MissingCellSeparator(String),
    /// A `Quality` line where a sub field has no `=`.
    #[error("no '=' in quality line segment: '{0}'")]
    MalformedQuality(String),
}

#[derive(Debug, Error)]
/// Failure of an external diagnostic command.
pub enum CommandError {
    /// The command could not be started at all.
    #[error("Unable to run '{command}'")]
    Spawn {
        #[allow(missing_docs)]
        command: String,
        #[allow(missing_docs)]
        #[source]
        source: io::Error,
    },
    /// The command ran but exited unsuccessfully.
    #[error("'{command}' failed with error code: {code:?} ({stderr})")]
    ExitStatus {
        #[allow(missing_docs)]
        command: String,
        /// `None` when the process was killed by a signal
        code: Option<i32>,
        #[allow(missing_docs)]
        stderr: String,
    },
    /// The blocking task running the command was lost.
    #[error("Command task aborted")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
/// Error surfaced to HTTP clients, always rendered as one of the two fixed messages.
pub enum StatusError {
    /// Battery command or parser failed.
    #[error("{}", BATTERY_ERROR_MESSAGE)]
    Battery(#[source] Cause),
    /// Wifi command or parser failed.
    #[error("{}", WIFI_ERROR_MESSAGE)]
    Wifi(#[source] Cause),
}

#[derive(Debug, Error)]
/// Underlying reason of a [`StatusError`].
pub enum Cause {
    #[allow(missing_docs)]
    #[error(transparent)]
    Command(#[from] CommandError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Parse(#[from] ParseError),
}
