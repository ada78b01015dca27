pub mod checks;
pub mod orchestrator;
pub mod resolver;
mod types;
pub mod version;

pub use orchestrator::Orchestrator;
pub use types::{Report, Step, StepRecord};
