use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which image source the lifecycle run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// Build from the local build definition.
    Build,
    /// Pull `<image>:<tag>` from the registry.
    Pull,
}

impl Workflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::Build => "build",
            Workflow::Pull => "pull",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub path: PathBuf,
    pub nameservers: Vec<String>,
    pub mount_target: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("custom_resolv.conf"),
            nameservers: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
            mount_target: "/etc/resolv.conf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub runtime: String,
    pub container_name: String,
    pub image: String,
    pub tag: String,
    pub port: String,
    pub env_file: PathBuf,
    pub restart: String,
    pub build_context: PathBuf,
    pub resolver: ResolverConfig,
    pub workflow: Workflow,
    /// Per-command timeout in seconds.
    pub command_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            container_name: "lobe-chat".to_string(),
            image: "lobehub/lobe-chat".to_string(),
            tag: "latest".to_string(),
            port: "3210:3210".to_string(),
            env_file: PathBuf::from("lobe.env"),
            restart: "always".to_string(),
            build_context: PathBuf::from("."),
            resolver: ResolverConfig::default(),
            workflow: Workflow::Build,
            command_timeout: 900,
        }
    }
}

impl Config {
    /// `<image>:<tag>`.
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    /// Anchor relative paths at `dir`. Absolute paths are left alone.
    pub fn resolve(mut self, dir: &Path) -> Self {
        self.env_file = anchor(dir, &self.env_file);
        self.build_context = anchor(dir, &self.build_context);
        self.resolver.path = anchor(dir, &self.resolver.path);
        self
    }
}

fn anchor(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else if path == Path::new(".") {
        dir.to_path_buf()
    } else {
        dir.join(path)
    }
}
