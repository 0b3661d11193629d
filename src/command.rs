//! Abstraction over external command execution.
//!
//! [`CommandRunner`] allows swapping the real shell execution
//! ([`ShellCommandRunner`]) with a mock in tests, as `upower`, `iwlist`,
//! `pmset` or `WMIC` are unavailable in CI.

use crate::error::CommandError;
use std::process::Command;

/// Trait for running a shell command line and capturing its stdout.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` and return its stdout, failing on a non zero exit status.
    fn run(&self, command: &str) -> Result<String, CommandError>;
}

/// Default implementation running the command line through the system shell
/// (`sh -c`, or `cmd /C` on windows) so that pipes are honored.
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str) -> Result<String, CommandError> {
        #[cfg(target_os = "windows")]
        let output = Command::new("cmd").args(["/C", command]).output();
        #[cfg(not(target_os = "windows"))]
        let output = Command::new("sh").args(["-c", command]).output();

        let output = output.map_err(|source| CommandError::Spawn {
            command: command.to_owned(),
            source,
        })?;
        if !output.status.success() {
            return Err(CommandError::ExitStatus {
                command: command.to_owned(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
