use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;

/// Coverage report format produced by the test command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageType {
    /// Cobertura XML (`coverage xml`, `cargo llvm-cov --cobertura`, ...).
    #[default]
    Cobertura,
    /// LCOV tracefile (`SF:` / `DA:` records).
    Lcov,
}

impl CoverageType {
    pub fn label(self) -> &'static str {
        match self {
            CoverageType::Cobertura => "cobertura",
            CoverageType::Lcov => "lcov",
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CoverageType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cobertura" => Ok(CoverageType::Cobertura),
            "lcov" => Ok(CoverageType::Lcov),
            _ => Err(AppError::config_error(format!(
                "Invalid coverage type '{}'. Expected 'cobertura' or 'lcov'.",
                s
            ))),
        }
    }
}

/// Line coverage of the source file under test.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CoverageSummary {
    /// Line numbers executed at least once, ascending.
    pub lines_covered: Vec<u32>,
    /// Instrumented line numbers never executed, ascending.
    pub lines_missed: Vec<u32>,
    /// Covered fraction in `[0, 1]`.
    pub percentage: f64,
}

impl CoverageSummary {
    pub fn from_lines(mut lines_covered: Vec<u32>, mut lines_missed: Vec<u32>) -> Self {
        lines_covered.sort_unstable();
        lines_covered.dedup();
        lines_missed.sort_unstable();
        lines_missed.dedup();

        let total = lines_covered.len() + lines_missed.len();
        let percentage =
            if total == 0 { 0.0 } else { lines_covered.len() as f64 / total as f64 };

        Self { lines_covered, lines_missed, percentage }
    }

    /// Whether this summary meets an integer percentage target.
    ///
    /// Compared on line counts so that e.g. 57 of 100 lines meets 57%. A
    /// report without instrumented lines only meets a 0% target.
    pub fn meets(&self, desired_coverage: u32) -> bool {
        let covered = self.lines_covered.len() as u64;
        let total = covered + self.lines_missed.len() as u64;
        if total == 0 {
            return desired_coverage == 0;
        }
        covered * 100 >= u64::from(desired_coverage) * total
    }

    /// Text block describing the coverage, used in prompts.
    pub fn describe(&self) -> String {
        format!(
            "Lines covered: {:?}\nLines missed: {:?}\nPercentage covered: {:.2}%",
            self.lines_covered,
            self.lines_missed,
            self.percentage * 100.0
        )
    }
}
