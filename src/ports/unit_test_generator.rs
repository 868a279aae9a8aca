use crate::domain::{AppError, GenerationReport, Prompt};

/// Port for the test generation engine.
pub trait UnitTestGenerator {
    /// Build the prompt the next generation round would send.
    ///
    /// Measures the baseline coverage first if it has not been measured yet.
    fn build_prompt(&mut self) -> Result<Prompt, AppError>;

    /// Generate and validate tests until the desired coverage is reached
    /// or the iteration budget is spent.
    fn generate(&mut self) -> Result<GenerationReport, AppError>;
}
