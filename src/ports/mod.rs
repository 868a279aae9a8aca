mod collaborators;
mod command_runner;
mod file_probe;
mod llm_client;
mod report_generator;
mod unit_test_generator;

pub use collaborators::CollaboratorFactory;
pub use command_runner::{CommandOutput, CommandRunner};
pub use file_probe::FileProbe;
pub use llm_client::{CompletionRequest, CompletionResponse, LlmClient, OfflineLlmClient};
pub use report_generator::ReportGenerator;
pub use unit_test_generator::UnitTestGenerator;
