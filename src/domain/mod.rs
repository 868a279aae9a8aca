pub mod config;
pub mod coverage;
pub mod error;
pub mod options;
pub mod prompt;
pub mod test_result;

pub use config::{AgentConfig, LlmConfig};
pub use coverage::{CoverageSummary, CoverageType};
pub use error::AppError;
pub use generated_tests::{GeneratedTest, GeneratedTestSuite};
pub use options::Options;
pub use prompt::{Prompt, language_for, number_lines};
pub use test_result::{FailedTest, GenerationReport, TestOutcome, TestStatus};
