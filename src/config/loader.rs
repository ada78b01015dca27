use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = ".relaunch.yaml";

/// Load `.relaunch.yaml` from `dir`, falling back to defaults when absent.
pub fn load_from_dir(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load(&path)
}

/// Load an explicit config file. A missing file is an error here.
pub fn load(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
