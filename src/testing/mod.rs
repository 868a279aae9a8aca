mod fake_collaborators;
mod fake_file_probe;
mod fake_llm_client;
mod scripted_runner;

#[allow(unused_imports)]
pub use fake_collaborators::{FakeCollaborators, FakeGenerator, FakeReporter};
#[allow(unused_imports)]
pub use fake_file_probe::FakeFileProbe;
#[allow(unused_imports)]
pub use fake_llm_client::FakeLlmClient;
#[allow(unused_imports)]
pub use scripted_runner::{RunStep, ScriptedRunner, cobertura_report};
