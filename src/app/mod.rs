pub mod cli;
pub mod config;
pub mod entry;
pub mod factory;
pub mod generator;
mod context;

pub use context::AppContext;
pub use factory::ProductionCollaborators;
