//! Production implementations of the ports.

pub mod assets;
pub mod coverage;
pub mod filesystem_probe;
pub mod html_report;
pub mod llm_client;
pub mod shell_runner;

pub use coverage::CoverageProcessor;
pub use filesystem_probe::StdFileProbe;
pub use html_report::HtmlReportGenerator;
pub use llm_client::{HttpLlmClient, RetryPolicy, RetryingLlmClient};
pub use shell_runner::ShellCommandRunner;
