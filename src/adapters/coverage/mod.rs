//! Coverage report processing.
//!
//! Reads the report written by the test command and extracts line coverage
//! for the single source file under test.

mod cobertura;
mod lcov;

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::domain::{AppError, CoverageSummary, CoverageType};

/// Slack for filesystems with coarse modification timestamps.
const MTIME_TOLERANCE: Duration = Duration::from_secs(1);

/// Extracts line coverage of one source file from a coverage report.
#[derive(Debug, Clone)]
pub struct CoverageProcessor {
    report_path: PathBuf,
    source_file_path: PathBuf,
    coverage_type: CoverageType,
}

/// Line hits reported for one file entry (a Cobertura `<class>` or an LCOV record).
#[derive(Debug, Clone, PartialEq)]
struct FileCoverage {
    path: String,
    lines: Vec<(u32, u64)>,
}

impl CoverageProcessor {
    pub fn new(report_path: &Path, source_file_path: &Path, coverage_type: CoverageType) -> Self {
        Self {
            report_path: report_path.to_path_buf(),
            source_file_path: source_file_path.to_path_buf(),
            coverage_type,
        }
    }

    /// Parse the report, requiring it to be written no earlier than `started_at`.
    pub fn process(&self, started_at: SystemTime) -> Result<CoverageSummary, AppError> {
        self.verify_report_update(started_at)?;
        let content = fs::read_to_string(&self.report_path)?;
        let summary = self.parse(&content)?;
        debug!(
            report = %self.report_path.display(),
            covered = summary.lines_covered.len(),
            missed = summary.lines_missed.len(),
            "processed coverage report"
        );
        Ok(summary)
    }

    /// Parse report content without freshness checks.
    pub fn parse(&self, content: &str) -> Result<CoverageSummary, AppError> {
        let files = match self.coverage_type {
            CoverageType::Cobertura => cobertura::file_entries(content),
            CoverageType::Lcov => lcov::file_entries(content),
        }
        .map_err(|details| AppError::CoverageParse { path: self.report_path.clone(), details })?;

        Ok(summarize(select_lines(files, &self.source_file_path)))
    }

    fn verify_report_update(&self, started_at: SystemTime) -> Result<(), AppError> {
        if !self.report_path.is_file() {
            return Err(AppError::CoverageReportNotFound(self.report_path.clone()));
        }

        let modified = fs::metadata(&self.report_path)?.modified()?;
        let threshold = started_at.checked_sub(MTIME_TOLERANCE).unwrap_or(started_at);
        if modified < threshold {
            return Err(AppError::CoverageReportStale(self.report_path.clone()));
        }
        Ok(())
    }
}

/// Fold `(line, hits)` pairs into a summary; a line hit anywhere counts as covered.
fn summarize(lines: Vec<(u32, u64)>) -> CoverageSummary {
    let mut covered = BTreeSet::new();
    let mut missed = BTreeSet::new();
    for (number, hits) in lines {
        if hits > 0 {
            covered.insert(number);
        } else {
            missed.insert(number);
        }
    }
    CoverageSummary::from_lines(
        covered.iter().copied().collect(),
        missed.difference(&covered).copied().collect(),
    )
}

/// Lines of the report entries that best match `source_file_path`.
///
/// The best entries share the longest trailing run of path components with
/// the source file. Several entries tie when one file is split across
/// classes, or when nothing but the file name matches.
fn select_lines(files: Vec<FileCoverage>, source_file_path: &Path) -> Vec<(u32, u64)> {
    let source = normal_components(source_file_path);
    let scored: Vec<(usize, FileCoverage)> = files
        .into_iter()
        .map(|file| {
            let candidate = file.path.trim().replace('\\', "/");
            (shared_suffix(&source, &normal_components(Path::new(&candidate))), file)
        })
        .collect();

    let best = scored.iter().map(|(score, _)| *score).max().unwrap_or(0);
    if best == 0 {
        return Vec::new();
    }
    debug!(matched_components = best, "selected coverage entries");

    scored
        .into_iter()
        .filter(|(score, _)| *score == best)
        .flat_map(|(_, file)| file.lines)
        .collect()
}

fn normal_components(path: &Path) -> Vec<&OsStr> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn shared_suffix(a: &[&OsStr], b: &[&OsStr]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}
