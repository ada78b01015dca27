use std::path::PathBuf;

use serde::Serialize;

/// Captured result of one runtime CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// `None` when the process was killed or terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Shorthand used by stub runtimes and tests.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Everything `docker run` needs to start the managed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    pub port: String,
    pub env_file: PathBuf,
    pub restart: String,
    pub dns: Vec<String>,
    /// `(host path, container path)` bind mounts.
    pub mounts: Vec<(PathBuf, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_requires_zero_exit() {
        assert!(CommandOutput::ok("").success());
        assert!(!CommandOutput::failed(1, "boom").success());
        assert!(!CommandOutput::default().success());
    }
}
