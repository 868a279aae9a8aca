//! Production wiring of the generation and reporting collaborators.

use crate::adapters::{
    HtmlReportGenerator, HttpLlmClient, RetryPolicy, RetryingLlmClient, ShellCommandRunner,
};
use crate::app::config::load_llm_config;
use crate::app::generator::CoverAgent;
use crate::domain::{AppError, Options};
use crate::ports::{CollaboratorFactory, LlmClient, OfflineLlmClient};

/// Builds the shell-runner + HTTP-LLM generator and the HTML reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionCollaborators;

impl CollaboratorFactory for ProductionCollaborators {
    type Generator = CoverAgent<ShellCommandRunner, Box<dyn LlmClient>>;
    type Reporter = HtmlReportGenerator;

    fn generator(&self, options: &Options) -> Result<Self::Generator, AppError> {
        let config = load_llm_config(options)?;
        let llm: Box<dyn LlmClient> = if options.prompt_only {
            Box::new(OfflineLlmClient)
        } else {
            let http = HttpLlmClient::from_env(&config)?;
            Box::new(RetryingLlmClient::new(http, RetryPolicy::from_config(&config)))
        };

        CoverAgent::new(options.clone(), ShellCommandRunner, llm, &config)
    }

    fn reporter(&self, _options: &Options) -> Result<Self::Reporter, AppError> {
        Ok(HtmlReportGenerator)
    }
}
