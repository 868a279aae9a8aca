//! CLI Adapter.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use url::Url;

use crate::app::entry::RunOutcome;
use crate::domain::options::{
    DEFAULT_DESIRED_COVERAGE, DEFAULT_MAX_ITERATIONS, DEFAULT_REPORT_FILEPATH,
};
use crate::domain::{AppError, CoverageType, Options};

#[derive(Parser, Debug)]
#[command(name = "cover-agent")]
#[command(version)]
#[command(
    about = "Generate unit tests with an LLM until a target code coverage is reached",
    long_about = None
)]
struct Cli {
    /// Path to the source file under test
    #[arg(long)]
    source_file_path: PathBuf,
    /// Path to the test file to extend
    #[arg(long)]
    test_file_path: PathBuf,
    /// Path to the coverage report written by the test command
    #[arg(long)]
    code_coverage_report_path: PathBuf,
    /// Shell command that runs the tests and writes the coverage report
    #[arg(long)]
    test_command: String,
    /// Directory to run the test command in [default: current directory]
    #[arg(long)]
    test_command_dir: Option<PathBuf>,
    /// Additional files given to the model as context
    #[arg(long, num_args = 1..)]
    included_files: Option<Vec<PathBuf>>,
    /// Coverage report format (cobertura, lcov)
    #[arg(long, default_value_t = CoverageType::Cobertura)]
    coverage_type: CoverageType,
    /// Output path of the HTML report
    #[arg(long, default_value = DEFAULT_REPORT_FILEPATH)]
    report_filepath: PathBuf,
    /// Target line coverage in percent
    #[arg(long, default_value_t = DEFAULT_DESIRED_COVERAGE)]
    desired_coverage: u32,
    /// Maximum number of generation rounds
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,
    /// Write the first prompt to generated_prompt.md and exit
    #[arg(long)]
    prompt_only: bool,
    /// Extra instructions appended to the prompt
    #[arg(long, default_value = "")]
    additional_instructions: String,
    /// Model name (overrides the config file)
    #[arg(long)]
    model: Option<String>,
    /// Chat completions API base URL (overrides the config file)
    #[arg(long)]
    api_base: Option<Url>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_options(self, cwd: &Path) -> Options {
        Options {
            source_file_path: self.source_file_path,
            test_file_path: self.test_file_path,
            code_coverage_report_path: self.code_coverage_report_path,
            test_command: self.test_command,
            test_command_dir: self.test_command_dir.unwrap_or_else(|| cwd.to_path_buf()),
            included_files: self.included_files,
            coverage_type: self.coverage_type,
            report_filepath: self.report_filepath,
            desired_coverage: self.desired_coverage,
            max_iterations: self.max_iterations,
            prompt_only: self.prompt_only,
            additional_instructions: self.additional_instructions,
            model: self.model,
            api_base: self.api_base,
            config_path: self.config,
        }
    }
}

/// Parse `args` (including the program name) into `Options`.
///
/// `cwd` is the default for `--test-command-dir`.
pub fn parse_options<I, T>(args: I, cwd: &Path) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(|cli| cli.into_options(cwd))
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = std::env::current_dir().map_err(AppError::from).and_then(|cwd| {
        let options = cli.into_options(&cwd);
        crate::run(&options, &cwd)
    });

    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::PromptWritten(path) => {
            println!("✅ Wrote prompt to {}", path.display());
        }
        RunOutcome::Completed { report, report_path } => {
            let marker = if report.target_reached { "✅" } else { "⚠️ " };
            println!(
                "{} Coverage {:.2}% -> {:.2}% after {} iteration(s)",
                marker,
                report.initial_coverage * 100.0,
                report.final_coverage * 100.0,
                report.iterations
            );
            println!("   {} test(s) kept, {} rolled back", report.passed(), report.failed());
            println!("   Report written to {}", report_path.display());
        }
    }
}
