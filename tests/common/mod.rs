//! Shared testing utilities for cover-agent CLI tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SOURCE_FILE: &str = "calc.py";
pub const TEST_FILE: &str = "test_calc.py";
pub const COVERAGE_REPORT: &str = "coverage.xml";

/// Runs the "suite": full coverage once `test_subtract` exists, half otherwise.
pub const TEST_COMMAND: &str = "if grep -q test_subtract test_calc.py; \
    then cp full.xml coverage.xml; else cp partial.xml coverage.xml; fi";

const SOURCE: &str = "def add(a, b):\n    return a + b\n\ndef subtract(a, b):\n    return a - b\n";
const TESTS: &str = "from calc import add\n\ndef test_add():\n    assert add(1, 2) == 3\n";

/// Testing harness providing an isolated project for CLI exercises.
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment with an empty work directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Create an environment holding a small Python project and its fake test command.
    pub fn with_project() -> Self {
        let ctx = Self::new();
        ctx.write(SOURCE_FILE, SOURCE);
        ctx.write(TEST_FILE, TESTS);
        ctx.write("partial.xml", &cobertura(&[1, 2], &[4, 5]));
        ctx.write("full.xml", &cobertura(&[1, 2, 4, 5], &[]));
        ctx
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write fixture file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    /// Build a command for invoking the compiled binary inside the project.
    ///
    /// The API key is always removed; tests that need one set it explicitly.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("cover-agent").expect("Failed to locate cover-agent binary");
        cmd.current_dir(&self.work_dir).env_remove("OPENAI_API_KEY").env("RUST_LOG", "warn");
        cmd
    }

    /// `cli()` with the four required flags filled in for the project fixture.
    pub fn agent(&self) -> Command {
        let mut cmd = self.cli();
        cmd.args([
            "--source-file-path",
            SOURCE_FILE,
            "--test-file-path",
            TEST_FILE,
            "--code-coverage-report-path",
            COVERAGE_REPORT,
            "--test-command",
            TEST_COMMAND,
        ]);
        cmd
    }
}

/// Minimal Cobertura document for `calc.py`.
pub fn cobertura(covered: &[u32], missed: &[u32]) -> String {
    let mut lines: Vec<(u32, u32)> = covered.iter().map(|line| (*line, 1)).collect();
    lines.extend(missed.iter().map(|line| (*line, 0)));
    lines.sort_unstable();

    let body: String = lines
        .iter()
        .map(|(number, hits)| format!("      <line number=\"{}\" hits=\"{}\"/>\n", number, hits))
        .collect();
    format!(
        "<?xml version=\"1.0\" ?>\n<coverage>\n<packages><package name=\".\"><classes>\n\
         <class name=\"calc.py\" filename=\"{}\">\n    <lines>\n{}    </lines>\n\
         </class>\n</classes></package></packages>\n</coverage>\n",
        SOURCE_FILE, body
    )
}

/// Chat completions body whose answer proposes `test_subtract`.
pub fn completion_body() -> String {
    let answer = "language: python\n\
        existing_test_function_signature: |\n  def test_add():\n\
        new_tests:\n\
        \x20 - test_behavior: Subtracting returns the difference\n\
        \x20   test_name: test_subtract\n\
        \x20   test_code: |\n\
        \x20     def test_subtract():\n\
        \x20         assert subtract(3, 1) == 2\n\
        \x20   new_imports_code: |\n\
        \x20     from calc import subtract\n\
        \x20   test_tags: happy path\n";
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": answer } }],
        "usage": { "prompt_tokens": 100, "completion_tokens": 40 }
    })
    .to_string()
}
