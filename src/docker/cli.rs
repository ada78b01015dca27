use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use super::commands;
use super::engine;
use super::types::{CommandOutput, RunSpec};
use crate::lifecycle::checks;
use crate::runtime::ContainerRuntime;

/// [`ContainerRuntime`] backed by the `docker` CLI, or anything that speaks
/// its flags (e.g. `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: String,
    timeout: Duration,
}

impl DockerCli {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    fn exec(&self, args: Vec<String>) -> Result<CommandOutput> {
        engine::execute(&self.bin, &args, self.timeout)
    }
}

impl ContainerRuntime for DockerCli {
    fn exists(&self, name: &str) -> Result<bool> {
        let out = self.exec(commands::exists_args(name))?;
        Ok(checks::container_listed(&out.stdout))
    }

    fn stop(&self, name: &str) -> Result<CommandOutput> {
        self.exec(commands::stop_args(name))
    }

    fn remove(&self, name: &str) -> Result<CommandOutput> {
        self.exec(commands::remove_args(name))
    }

    fn build(&self, image_ref: &str, context: &Path) -> Result<CommandOutput> {
        self.exec(commands::build_args(image_ref, context))
    }

    fn pull(&self, image_ref: &str) -> Result<CommandOutput> {
        self.exec(commands::pull_args(image_ref))
    }

    fn run(&self, spec: &RunSpec) -> Result<CommandOutput> {
        self.exec(commands::run_args(spec))
    }

    fn inspect(&self, image_ref: &str) -> Result<CommandOutput> {
        self.exec(commands::inspect_args(image_ref))
    }

    fn prune(&self) -> Result<CommandOutput> {
        self.exec(commands::prune_args())
    }
}
