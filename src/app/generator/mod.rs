//! Production test generation engine.
//!
//! Each round asks the model for new tests, splices every test into the test
//! file, and keeps it only if the suite still passes and line coverage of the
//! source file went up. Rejected tests are rolled back and replayed to the
//! model in later rounds.

mod prompt_builder;
mod test_file;

use std::fs;

use tracing::{debug, info, warn};

use crate::adapters::CoverageProcessor;
use crate::domain::{
    AppError, CoverageSummary, FailedTest, GeneratedTest, GeneratedTestSuite, GenerationReport,
    LlmConfig, Options, Prompt, TestOutcome, TestStatus,
};
use crate::ports::{CommandOutput, CommandRunner, CompletionRequest, LlmClient, UnitTestGenerator};

pub use prompt_builder::{MAX_TESTS_PER_PROMPT, PromptBuilder};
pub use test_file::insert_test;

const REASON_TEST_FAILED: &str = "Test failed";
const REASON_NO_COVERAGE_GAIN: &str = "Coverage did not increase";

pub struct CoverAgent<R: CommandRunner, L: LlmClient> {
    options: Options,
    runner: R,
    llm: L,
    max_tokens: u32,
    temperature: f32,
    coverage: CoverageProcessor,
    prompt_builder: PromptBuilder,
    failed_tests: Vec<FailedTest>,
    current: Option<CoverageSummary>,
}

impl<R: CommandRunner, L: LlmClient> CoverAgent<R, L> {
    pub fn new(
        options: Options,
        runner: R,
        llm: L,
        llm_config: &LlmConfig,
    ) -> Result<Self, AppError> {
        let coverage = CoverageProcessor::new(
            &options.code_coverage_report_path,
            &options.source_file_path,
            options.coverage_type,
        );
        let prompt_builder = PromptBuilder::new(&options)?;

        Ok(Self {
            options,
            runner,
            llm,
            max_tokens: llm_config.max_tokens,
            temperature: llm_config.temperature,
            coverage,
            prompt_builder,
            failed_tests: Vec::new(),
            current: None,
        })
    }

    /// Run the test command and measure coverage; the suite must pass.
    fn run_coverage(&mut self) -> Result<CoverageSummary, AppError> {
        let output = self.run_tests()?;
        if !output.success() {
            return Err(AppError::TestCommandFailed {
                command: self.options.test_command.clone(),
                exit_code: output.exit_code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            });
        }

        let summary = self.coverage.process(output.started_at)?;
        info!(coverage = %format!("{:.2}%", summary.percentage * 100.0), "measured coverage");
        self.current = Some(summary.clone());
        Ok(summary)
    }

    fn current_coverage(&mut self) -> Result<CoverageSummary, AppError> {
        match &self.current {
            Some(summary) => Ok(summary.clone()),
            None => self.run_coverage(),
        }
    }

    fn run_tests(&self) -> Result<CommandOutput, AppError> {
        self.runner.run(&self.options.test_command, &self.options.test_command_dir)
    }

    /// Ask the model for a batch of tests.
    fn request_tests(&mut self) -> Result<GeneratedTestSuite, AppError> {
        let prompt = self.build_prompt()?;
        let response = self.llm.complete(CompletionRequest {
            system: prompt.system,
            user: prompt.user,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })?;

        match GeneratedTestSuite::parse(&response.content) {
            Ok(suite) => Ok(suite),
            Err(err) => {
                warn!("discarding unparseable model answer: {}", err);
                Ok(GeneratedTestSuite::default())
            }
        }
    }

    /// Splice `test` into the test file and keep it only if it passes and
    /// increases coverage.
    fn validate_test(&mut self, test: GeneratedTest) -> Result<TestOutcome, AppError> {
        let before = self.current_coverage()?;
        let test_file_path = self.options.test_file_path.clone();
        let original = fs::read_to_string(&test_file_path)?;
        fs::write(&test_file_path, insert_test(&original, &test))?;

        let output = match self.run_tests() {
            Ok(output) => output,
            Err(err) => {
                fs::write(&test_file_path, &original)?;
                return Err(err);
            }
        };

        let mut outcome = TestOutcome {
            status: TestStatus::Fail,
            reason: String::new(),
            exit_code: output.exit_code,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            test,
            coverage_before: before.percentage,
            coverage_after: before.percentage,
        };

        if !output.success() {
            outcome.reason = REASON_TEST_FAILED.to_string();
        } else {
            match self.coverage.process(output.started_at) {
                Err(err) => outcome.reason = format!("Coverage report error: {}", err),
                Ok(after) if after.percentage <= before.percentage => {
                    outcome.reason = REASON_NO_COVERAGE_GAIN.to_string();
                }
                Ok(after) => {
                    outcome.status = TestStatus::Pass;
                    outcome.coverage_after = after.percentage;
                    self.current = Some(after);
                }
            }
        }

        if outcome.is_pass() {
            info!(
                test = %outcome.test.test_name,
                coverage = %format!("{:.2}%", outcome.coverage_after * 100.0),
                "accepted generated test"
            );
        } else {
            fs::write(&test_file_path, &original)?;
            debug!(
                test = %outcome.test.test_name,
                reason = %outcome.reason,
                "rolled back generated test"
            );
            self.failed_tests.push(FailedTest::from(&outcome));
        }

        Ok(outcome)
    }
}

impl<R: CommandRunner, L: LlmClient> UnitTestGenerator for CoverAgent<R, L> {
    fn build_prompt(&mut self) -> Result<Prompt, AppError> {
        let coverage = self.current_coverage()?;
        self.prompt_builder.build(&coverage.describe(), &self.failed_tests)
    }

    fn generate(&mut self) -> Result<GenerationReport, AppError> {
        let initial = self.current_coverage()?;
        let desired = self.options.desired_coverage;
        let mut report =
            GenerationReport { initial_coverage: initial.percentage, ..Default::default() };
        let mut coverage = initial;

        while !coverage.meets(desired) && report.iterations < self.options.max_iterations {
            info!(
                iteration = report.iterations + 1,
                max_iterations = self.options.max_iterations,
                coverage = %format!("{:.2}%", coverage.percentage * 100.0),
                desired = %format!("{}%", desired),
                "starting generation round"
            );

            let suite = self.request_tests()?;
            if suite.new_tests.is_empty() {
                warn!("model proposed no tests this round");
            }
            for test in suite.new_tests {
                let outcome = self.validate_test(test)?;
                report.outcomes.push(outcome);
            }

            report.iterations += 1;
            coverage = self.current_coverage()?;
        }

        report.final_coverage = coverage.percentage;
        report.target_reached = coverage.meets(desired);
        if report.target_reached {
            info!("reached desired coverage of {}%", desired);
        } else {
            info!("stopped after {} iteration(s) below desired coverage", report.iterations);
        }
        Ok(report)
    }
}
