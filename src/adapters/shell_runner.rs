use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::{CommandOutput, CommandRunner};

/// Runs commands through `sh -c`, capturing output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandOutput, AppError> {
        debug!(command, cwd = %cwd.display(), "running test command");

        let started_at = SystemTime::now();
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .output()
            .map_err(|e| AppError::CommandSpawn {
                command: command.to_string(),
                details: e.to_string(),
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            started_at,
        };
        debug!(exit_code = ?result.exit_code, "test command finished");
        Ok(result)
    }
}
