use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// OCI annotation carrying the image's semantic version.
pub const VERSION_LABEL: &str = "org.opencontainers.image.version";

pub const UNKNOWN_VERSION: &str = "Unknown version";

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("malformed image metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("image metadata lists no images")]
    NoImage,
}

#[derive(Debug, Deserialize)]
struct ImageInspect {
    #[serde(rename = "Config")]
    config: ImageConfig,
}

#[derive(Debug, Deserialize)]
struct ImageConfig {
    #[serde(rename = "Labels", default)]
    labels: Option<HashMap<String, String>>,
}

/// Pull the version label out of `inspect` JSON.
///
/// An image without the label (or without any labels) yields
/// [`UNKNOWN_VERSION`].
pub fn extract_version(inspect_json: &str) -> Result<String, VersionError> {
    let images: Vec<ImageInspect> = serde_json::from_str(inspect_json)?;
    let first = images.into_iter().next().ok_or(VersionError::NoImage)?;
    Ok(first
        .config
        .labels
        .and_then(|mut labels| labels.remove(VERSION_LABEL))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
}
