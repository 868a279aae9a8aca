use serde::Serialize;

use crate::domain::GeneratedTest;

/// Verdict for a generated test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// Test passed and increased coverage; kept in the test file.
    Pass,
    /// Test was rolled back.
    Fail,
}

/// Result of validating one generated test against the real suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    pub status: TestStatus,
    pub reason: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub test: GeneratedTest,
    pub coverage_before: f64,
    pub coverage_after: f64,
}

impl TestOutcome {
    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }
}

/// A rejected test, replayed to the model so it does not propose it again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedTest {
    pub test_code: String,
    pub error_message: String,
}

impl From<&TestOutcome> for FailedTest {
    fn from(outcome: &TestOutcome) -> Self {
        let detail = if outcome.stderr.trim().is_empty() { &outcome.stdout } else { &outcome.stderr };
        let error_message = if detail.trim().is_empty() {
            outcome.reason.clone()
        } else {
            format!("{}\n{}", outcome.reason, detail.trim())
        };
        Self { test_code: outcome.test.test_code.clone(), error_message }
    }
}

/// Summary of a full generation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<TestOutcome>,
    pub initial_coverage: f64,
    pub final_coverage: f64,
    pub iterations: u32,
    pub target_reached: bool,
}

impl GenerationReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}
