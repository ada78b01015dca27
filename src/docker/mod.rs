// Runtime CLI plumbing — argument builders, process execution, captured output.

pub mod cli;
pub mod commands;
pub mod engine;
pub mod types;

pub use cli::DockerCli;
pub use engine::{ensure_available, execute};
pub use types::{CommandOutput, RunSpec};
