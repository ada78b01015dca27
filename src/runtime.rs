use std::path::Path;

use anyhow::Result;

use crate::docker::{CommandOutput, RunSpec};

/// The operations the lifecycle needs from a container runtime.
///
/// All calls block until the underlying command finishes. `Err` means the
/// command could not be issued at all; a command that ran and failed comes
/// back as `Ok` with a non-zero exit code.
pub trait ContainerRuntime {
    /// Whether a container named `name` exists, running or stopped.
    fn exists(&self, name: &str) -> Result<bool>;
    fn stop(&self, name: &str) -> Result<CommandOutput>;
    fn remove(&self, name: &str) -> Result<CommandOutput>;
    fn build(&self, image_ref: &str, context: &Path) -> Result<CommandOutput>;
    fn pull(&self, image_ref: &str) -> Result<CommandOutput>;
    fn run(&self, spec: &RunSpec) -> Result<CommandOutput>;
    /// Image metadata as the runtime's JSON document.
    fn inspect(&self, image_ref: &str) -> Result<CommandOutput>;
    /// Remove dangling images.
    fn prune(&self) -> Result<CommandOutput>;
}
