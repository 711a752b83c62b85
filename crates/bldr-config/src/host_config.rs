//! Host configuration file (`bldr.toml`)
//!
//! The host configuration is a small TOML document. The only key the hook
//! consumes today is `block-loader`, the path of the block manifest.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ConfigError;

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "BLDR_CONFIG";

/// File name of the project-level config
pub const CONFIG_FILE_NAME: &str = "bldr.toml";

/// Keys accepted by [`HostConfig::get`] and [`HostConfig::set`]
pub const KNOWN_KEYS: &[&str] = &["block-loader"];

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct HostConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_loader: Option<String>,
}

impl HostConfig {
    /// Resolve the config file location.
    ///
    /// `BLDR_CONFIG` wins when set and non-empty. Otherwise a `bldr.toml` in
    /// the working directory is preferred, then the per-user config under the
    /// platform config dir. When neither exists the project path is returned
    /// so that `save` creates it there.
    pub fn path() -> PathBuf {
        let env_override = std::env::var(CONFIG_ENV).ok();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let user_config = dirs::config_dir().map(|dir| dir.join("bldr").join(CONFIG_FILE_NAME));
        resolve_config_path(env_override.as_deref(), &cwd, user_config.as_deref())
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    /// Load config from a specific path, returning the default config if the file is missing
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No host config at {}, using defaults", path.display());
            return Ok(HostConfig::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "block-loader" => self.block_loader.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "block-loader" => {
                self.block_loader = Some(value);
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.block_loader.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        let mut values = Vec::new();
        if let Some(ref val) = self.block_loader {
            values.push(("block-loader", val.clone()));
        }
        values
    }
}

/// Pure form of [`HostConfig::path`]
pub fn resolve_config_path(
    env_override: Option<&str>,
    cwd: &Path,
    user_config: Option<&Path>,
) -> PathBuf {
    if let Some(explicit) = env_override.map(str::trim).filter(|p| !p.is_empty()) {
        return PathBuf::from(explicit);
    }

    let project = cwd.join(CONFIG_FILE_NAME);
    if project.exists() {
        return project;
    }

    match user_config {
        Some(user) if user.exists() => user.to_path_buf(),
        _ => project,
    }
}
