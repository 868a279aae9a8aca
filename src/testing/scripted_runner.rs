use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::domain::AppError;
use crate::ports::{CommandOutput, CommandRunner};

/// One scripted test command execution.
#[derive(Debug, Clone)]
pub struct RunStep {
    pub exit_code: i32,
    /// Coverage report content written during the run, if any.
    pub report: Option<String>,
    pub stderr: String,
}

impl RunStep {
    pub fn passing(report: String) -> Self {
        Self { exit_code: 0, report: Some(report), stderr: String::new() }
    }

    pub fn failing(stderr: &str) -> Self {
        Self { exit_code: 1, report: None, stderr: stderr.to_string() }
    }
}

/// Command runner that replays scripted steps and snapshots the test file.
#[derive(Clone)]
pub struct ScriptedRunner {
    report_path: PathBuf,
    test_file_path: PathBuf,
    steps: Arc<Mutex<VecDeque<RunStep>>>,
    /// Test file content observed at each run.
    pub seen_test_files: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new(report_path: &Path, test_file_path: &Path, steps: Vec<RunStep>) -> Self {
        Self {
            report_path: report_path.to_path_buf(),
            test_file_path: test_file_path.to_path_buf(),
            steps: Arc::new(Mutex::new(steps.into())),
            seen_test_files: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn runs(&self) -> usize {
        self.seen_test_files.lock().unwrap().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, _cwd: &Path) -> Result<CommandOutput, AppError> {
        let started_at = SystemTime::now();
        let snapshot = fs::read_to_string(&self.test_file_path).unwrap_or_default();
        self.seen_test_files.lock().unwrap().push(snapshot);

        let step = self.steps.lock().unwrap().pop_front().ok_or_else(|| AppError::CommandSpawn {
            command: command.to_string(),
            details: "test: no scripted run left".into(),
        })?;
        if let Some(report) = &step.report {
            fs::write(&self.report_path, report)?;
        }

        Ok(CommandOutput {
            stdout: String::new(),
            stderr: step.stderr,
            exit_code: Some(step.exit_code),
            started_at,
        })
    }
}

/// Minimal Cobertura report for a single file.
pub fn cobertura_report(filename: &str, covered: &[u32], missed: &[u32]) -> String {
    let mut lines: Vec<(u32, u32)> = covered.iter().map(|line| (*line, 1)).collect();
    lines.extend(missed.iter().map(|line| (*line, 0)));
    lines.sort_unstable();

    let body: String = lines
        .iter()
        .map(|(number, hits)| format!("<line number=\"{}\" hits=\"{}\"/>", number, hits))
        .collect();
    format!(
        "<coverage><packages><package><classes><class filename=\"{}\"><lines>{}</lines></class></classes></package></packages></coverage>",
        filename, body
    )
}
