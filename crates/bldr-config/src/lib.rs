//! Configuration management for the bldr hook
//!
//! Reads the host configuration file and resolves the settings a manifest
//! synchronizer needs, most importantly the manifest path (`block-loader`).

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod errors;
pub mod host_config;
pub mod loader;

pub use errors::ConfigError;
pub use host_config::{resolve_config_path, HostConfig, CONFIG_ENV, KNOWN_KEYS};
pub use loader::{LoaderConfig, DEFAULT_BLOCK_LOADER};
