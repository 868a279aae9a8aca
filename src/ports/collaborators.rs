use crate::domain::{AppError, Options};
use crate::ports::{ReportGenerator, UnitTestGenerator};

/// Port that constructs the generation and reporting collaborators.
///
/// Construction is deferred until the entry point's preconditions hold, so a
/// failed precondition never builds either collaborator.
pub trait CollaboratorFactory {
    type Generator: UnitTestGenerator;
    type Reporter: ReportGenerator;

    fn generator(&self, options: &Options) -> Result<Self::Generator, AppError>;

    fn reporter(&self, options: &Options) -> Result<Self::Reporter, AppError>;
}
