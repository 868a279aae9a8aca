use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, GenerationReport, Options, Prompt};
use crate::ports::{CollaboratorFactory, ReportGenerator, UnitTestGenerator};

/// Records which collaborators were built and what they were asked to do.
#[derive(Clone, Default)]
pub struct FakeCollaborators {
    pub generator_options: Arc<Mutex<Vec<Options>>>,
    pub reporters_built: Arc<Mutex<usize>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub report_paths: Arc<Mutex<Vec<PathBuf>>>,
    pub report: GenerationReport,
    pub prompt: Prompt,
}

impl FakeCollaborators {
    pub fn new() -> Self {
        Self {
            prompt: Prompt { system: "system".into(), user: "user prompt".into() },
            ..Default::default()
        }
    }

    pub fn generators_built(&self) -> usize {
        self.generator_options.lock().unwrap().len()
    }

    pub fn reporters_built(&self) -> usize {
        *self.reporters_built.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CollaboratorFactory for FakeCollaborators {
    type Generator = FakeGenerator;
    type Reporter = FakeReporter;

    fn generator(&self, options: &Options) -> Result<FakeGenerator, AppError> {
        self.generator_options.lock().unwrap().push(options.clone());
        Ok(FakeGenerator {
            calls: Arc::clone(&self.calls),
            prompt: self.prompt.clone(),
            report: self.report.clone(),
        })
    }

    fn reporter(&self, _options: &Options) -> Result<FakeReporter, AppError> {
        *self.reporters_built.lock().unwrap() += 1;
        Ok(FakeReporter { calls: Arc::clone(&self.calls), paths: Arc::clone(&self.report_paths) })
    }
}

pub struct FakeGenerator {
    calls: Arc<Mutex<Vec<String>>>,
    prompt: Prompt,
    report: GenerationReport,
}

impl UnitTestGenerator for FakeGenerator {
    fn build_prompt(&mut self) -> Result<Prompt, AppError> {
        self.calls.lock().unwrap().push("build_prompt".into());
        Ok(self.prompt.clone())
    }

    fn generate(&mut self) -> Result<GenerationReport, AppError> {
        self.calls.lock().unwrap().push("generate".into());
        Ok(self.report.clone())
    }
}

pub struct FakeReporter {
    calls: Arc<Mutex<Vec<String>>>,
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl ReportGenerator for FakeReporter {
    fn generate_report(&self, _report: &GenerationReport, path: &Path) -> Result<(), AppError> {
        self.calls.lock().unwrap().push("generate_report".into());
        self.paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
