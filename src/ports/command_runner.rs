//! Shell command execution port.

use std::path::Path;
use std::time::SystemTime;

use crate::domain::AppError;

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock time just before the process was spawned.
    pub started_at: SystemTime,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running the project's test command.
pub trait CommandRunner {
    /// Run `command` through the shell in `cwd` and wait for it to finish.
    ///
    /// A non-zero exit is reported through `CommandOutput::exit_code`, not as an error.
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput, AppError>;
}
