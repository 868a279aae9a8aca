use std::path::Path;

use crate::domain::{AppError, GenerationReport};

/// Port for writing a human-readable report of a generation run.
pub trait ReportGenerator {
    fn generate_report(&self, report: &GenerationReport, path: &Path) -> Result<(), AppError>;
}
