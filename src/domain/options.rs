use std::path::PathBuf;

use url::Url;

use crate::domain::CoverageType;

pub const DEFAULT_REPORT_FILEPATH: &str = "test_results.html";
pub const DEFAULT_DESIRED_COVERAGE: u32 = 90;
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Resolved options for a single cover-agent invocation.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// File under test.
    pub source_file_path: PathBuf,
    /// Test file that generated tests are appended to.
    pub test_file_path: PathBuf,
    /// Coverage report written by the test command.
    pub code_coverage_report_path: PathBuf,
    /// Shell command that runs the test suite.
    pub test_command: String,
    /// Working directory for `test_command`.
    pub test_command_dir: PathBuf,
    /// Extra files passed to the model as context.
    pub included_files: Option<Vec<PathBuf>>,
    pub coverage_type: CoverageType,
    /// Output path of the HTML report.
    pub report_filepath: PathBuf,
    /// Target line coverage, in percent.
    pub desired_coverage: u32,
    /// Upper bound on generation rounds.
    pub max_iterations: u32,
    /// Only write the first prompt to disk.
    pub prompt_only: bool,
    /// Free-form guidance appended to the prompt.
    pub additional_instructions: String,
    /// Model override; falls back to the config file.
    pub model: Option<String>,
    /// API endpoint override; falls back to the config file.
    pub api_base: Option<Url>,
    /// Optional TOML configuration file.
    pub config_path: Option<PathBuf>,
}

impl Options {
    /// Options with every optional field at its default.
    pub fn new(
        source_file_path: impl Into<PathBuf>,
        test_file_path: impl Into<PathBuf>,
        code_coverage_report_path: impl Into<PathBuf>,
        test_command: impl Into<String>,
        test_command_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_file_path: source_file_path.into(),
            test_file_path: test_file_path.into(),
            code_coverage_report_path: code_coverage_report_path.into(),
            test_command: test_command.into(),
            test_command_dir: test_command_dir.into(),
            included_files: None,
            coverage_type: CoverageType::default(),
            report_filepath: PathBuf::from(DEFAULT_REPORT_FILEPATH),
            desired_coverage: DEFAULT_DESIRED_COVERAGE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prompt_only: false,
            additional_instructions: String::new(),
            model: None,
            api_base: None,
            config_path: None,
        }
    }
}
