//! cover-agent: generate unit tests with an LLM until a line coverage target is met.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::StdFileProbe;
use app::{AppContext, ProductionCollaborators, entry};

pub use app::entry::{PROMPT_ONLY_FILE, RunOutcome};
pub use domain::{AppError, CoverageType, GenerationReport, Options};

/// Run cover-agent with the production collaborators.
///
/// `work_dir` receives the prompt file in prompt-only runs.
pub fn run(options: &Options, work_dir: &Path) -> Result<RunOutcome, AppError> {
    let ctx = AppContext::new(StdFileProbe, ProductionCollaborators, work_dir);
    entry::execute(&ctx, options)
}
