//! HTML report of generated tests.

use std::fs;
use std::path::Path;

use chrono::Local;
use minijinja::{Environment, context};
use tracing::info;

use crate::adapters::assets;
use crate::domain::{AppError, GenerationReport};
use crate::ports::ReportGenerator;

const TEMPLATE_NAME: &str = "report.html";

/// Renders the embedded HTML template to a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReportGenerator;

impl HtmlReportGenerator {
    pub fn render(&self, report: &GenerationReport) -> Result<String, AppError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, assets::report_template()?)
            .map_err(|e| AppError::Report(e.to_string()))?;
        let template = env.get_template(TEMPLATE_NAME).map_err(|e| AppError::Report(e.to_string()))?;

        template
            .render(context! {
                generated_at => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                iterations => report.iterations,
                initial_coverage => format!("{:.2}", report.initial_coverage * 100.0),
                final_coverage => format!("{:.2}", report.final_coverage * 100.0),
                target_reached => report.target_reached,
                passed => report.passed(),
                failed => report.failed(),
                outcomes => &report.outcomes,
            })
            .map_err(|e| AppError::Report(e.to_string()))
    }
}

impl ReportGenerator for HtmlReportGenerator {
    fn generate_report(&self, report: &GenerationReport, path: &Path) -> Result<(), AppError> {
        let html = self.render(report)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        info!(path = %path.display(), "wrote test report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneratedTest, TestOutcome, TestStatus};
    use tempfile::TempDir;

    fn report() -> GenerationReport {
        GenerationReport {
            outcomes: vec![
                TestOutcome {
                    status: TestStatus::Pass,
                    reason: String::new(),
                    exit_code: Some(0),
                    stdout: "1 passed".into(),
                    stderr: String::new(),
                    test: GeneratedTest {
                        test_name: "test_compare".into(),
                        test_code: "assert a < b".into(),
                        ..Default::default()
                    },
                    coverage_before: 0.5,
                    coverage_after: 0.75,
                },
                TestOutcome {
                    status: TestStatus::Fail,
                    reason: "Test failed".into(),
                    exit_code: Some(1),
                    stdout: String::new(),
                    stderr: "AssertionError".into(),
                    test: GeneratedTest { test_name: "test_broken".into(), ..Default::default() },
                    coverage_before: 0.75,
                    coverage_after: 0.75,
                },
            ],
            initial_coverage: 0.5,
            final_coverage: 0.75,
            iterations: 1,
            target_reached: false,
        }
    }

    #[test]
    fn render_escapes_test_code() {
        let html = HtmlReportGenerator.render(&report()).unwrap();

        assert!(html.contains("assert a &lt; b"));
        assert!(!html.contains("assert a < b"));
    }

    #[test]
    fn render_includes_summary_and_statuses() {
        let html = HtmlReportGenerator.render(&report()).unwrap();

        assert!(html.contains("Coverage: 50.00% &rarr; 75.00%"));
        assert!(html.contains("Passed: 1"));
        assert!(html.contains("Failed: 1"));
        assert!(html.contains("status-PASS"));
        assert!(html.contains("AssertionError"));
    }

    #[test]
    fn empty_run_says_no_tests() {
        let html = HtmlReportGenerator.render(&GenerationReport::default()).unwrap();
        assert!(html.contains("No tests were generated."));
    }

    #[test]
    fn generate_report_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/run/test_results.html");

        HtmlReportGenerator.generate_report(&report(), &path).unwrap();

        assert!(fs::read_to_string(path).unwrap().contains("test_compare"));
    }
}
