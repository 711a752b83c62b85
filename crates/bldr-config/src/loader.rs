//! Resolved settings for a single manifest synchronizer

use std::path::{Path, PathBuf};

use crate::host_config::HostConfig;

/// Manifest location used when the host config has no `block-loader` key
pub const DEFAULT_BLOCK_LOADER: &str = ".bldr/blocks.yml";

/// Settings resolved once from the host configuration and owned by the
/// synchronizer for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    manifest_path: PathBuf,
}

impl LoaderConfig {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn from_host(config: &HostConfig) -> Self {
        let path = config
            .block_loader
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_BLOCK_LOADER);
        Self::new(path)
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_LOADER)
    }
}
