//! Prompt assembly for test generation.
//!
//! Reads the source, test and included files fresh on every build, since the
//! test file grows as generated tests are accepted.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, context};
use serde::Serialize;

use crate::adapters::assets::{self, PromptTemplate};
use crate::domain::{AppError, FailedTest, Options, Prompt, language_for, number_lines};

/// Upper bound on tests requested per round.
pub const MAX_TESTS_PER_PROMPT: usize = 4;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Debug, Serialize)]
struct IncludedFile {
    path: String,
    content: String,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source_file_path: PathBuf,
    test_file_path: PathBuf,
    included_files: Vec<PathBuf>,
    additional_instructions: String,
    template: PromptTemplate,
}

impl PromptBuilder {
    pub fn new(options: &Options) -> Result<Self, AppError> {
        Ok(Self {
            source_file_path: options.source_file_path.clone(),
            test_file_path: options.test_file_path.clone(),
            included_files: options.included_files.clone().unwrap_or_default(),
            additional_instructions: options.additional_instructions.trim().to_string(),
            template: assets::test_generation_prompt()?,
        })
    }

    /// Render the prompt for the current test file and coverage state.
    pub fn build(
        &self,
        code_coverage_report: &str,
        failed_tests: &[FailedTest],
    ) -> Result<Prompt, AppError> {
        let source = read(&self.source_file_path)?;
        let test_file = read(&self.test_file_path)?;
        let included_files = self
            .included_files
            .iter()
            .map(|path| Ok(IncludedFile { path: path.display().to_string(), content: read(path)? }))
            .collect::<Result<Vec<_>, AppError>>()?;

        let ctx = context! {
            language => language_for(&self.source_file_path),
            source_file_name => file_name(&self.source_file_path),
            source_file_numbered => number_lines(&source),
            test_file_name => file_name(&self.test_file_path),
            test_file => test_file,
            included_files => included_files,
            code_coverage_report => code_coverage_report,
            failed_tests => failed_tests,
            additional_instructions => &self.additional_instructions,
            max_tests => MAX_TESTS_PER_PROMPT,
        };

        Ok(Prompt {
            system: render(&self.template.system, &ctx, "system")?,
            user: render(&self.template.user, &ctx, "user")?,
        })
    }
}

fn render(template: &str, ctx: &minijinja::Value, name: &str) -> Result<String, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env
    });

    env.render_str(template, ctx)
        .map_err(|err| AppError::PromptTemplate(format!("{} prompt: {}", name, err)))
}

fn read(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|err| {
        AppError::PromptTemplate(format!("failed to read {}: {}", path.display(), err))
    })
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}
