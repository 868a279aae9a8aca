//! Run entry point: precondition gates, then generation and reporting.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::app::AppContext;
use crate::domain::{AppError, GenerationReport, Options};
use crate::ports::{CollaboratorFactory, FileProbe, ReportGenerator, UnitTestGenerator};

/// File that receives the prompt in prompt-only runs, relative to the work dir.
pub const PROMPT_ONLY_FILE: &str = "generated_prompt.md";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Prompt-only run; the prompt was written to this path.
    PromptWritten(PathBuf),
    /// Full run; the report was written to `report_path`.
    Completed { report: GenerationReport, report_path: PathBuf },
}

/// Validate preconditions, then drive the generator and the reporter.
///
/// Both file checks run before any collaborator is constructed; the source
/// file is checked first and a failure there short-circuits the test file
/// check. Collaborator errors propagate unchanged.
pub fn execute<P, F>(ctx: &AppContext<P, F>, options: &Options) -> Result<RunOutcome, AppError>
where
    P: FileProbe,
    F: CollaboratorFactory,
{
    if !ctx.probe().is_file(&options.source_file_path) {
        return Err(AppError::SourceFileNotFound(options.source_file_path.clone()));
    }
    if !ctx.probe().is_file(&options.test_file_path) {
        return Err(AppError::TestFileNotFound(options.test_file_path.clone()));
    }

    let mut generator = ctx.collaborators().generator(options)?;

    if options.prompt_only {
        let prompt = generator.build_prompt()?;
        let path = ctx.work_dir().join(PROMPT_ONLY_FILE);
        fs::write(&path, prompt.user)?;
        info!(path = %path.display(), "wrote prompt");
        return Ok(RunOutcome::PromptWritten(path));
    }

    let report = generator.generate()?;

    let reporter = ctx.collaborators().reporter(options)?;
    reporter.generate_report(&report, &options.report_filepath)?;

    Ok(RunOutcome::Completed { report, report_path: options.report_filepath.clone() })
}
