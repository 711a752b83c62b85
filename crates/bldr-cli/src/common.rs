//! Common types and utilities shared across commands

use bldr_config::{HostConfig, LoaderConfig};
use clap::Parser;
use std::path::PathBuf;

/// File name of the hook log, kept next to the block manifest
pub const LOG_FILE_NAME: &str = "bldr.log";

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Block manifest to use instead of the configured block-loader"
    )]
    pub manifest: Option<PathBuf>,

    #[arg(long, global = true, help = "Do not write a log file")]
    pub no_log_file: bool,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Resolve the manifest settings, honoring `--manifest` over the host config
    pub fn loader_config(&self, config: &HostConfig) -> LoaderConfig {
        match self.manifest {
            Some(ref path) => LoaderConfig::new(path),
            None => LoaderConfig::from_host(config),
        }
    }

    /// Log file location for this run, or `None` when file logging is off
    pub fn log_file(&self, config: &HostConfig) -> Option<PathBuf> {
        if self.no_log_file {
            return None;
        }
        let loader = self.loader_config(config);
        let dir = loader
            .manifest_path()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        Some(dir.join(LOG_FILE_NAME))
    }
}
