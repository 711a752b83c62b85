use crate::errors::CliError;
use crate::GlobalOpts;
use bldr_config::{ConfigError, HostConfig, DEFAULT_BLOCK_LOADER, KNOWN_KEYS};
use bldr_logger as logger;
use clap::Subcommand;
use colored::*;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show all configured values
    Show,
    /// Print a single configured value
    Get { key: String },
    /// Set a value and save the config file
    Set { key: String, value: String },
    /// Print the path of the config file in use
    Path,
}

pub fn handle_config(action: ConfigAction, _opts: &GlobalOpts) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = HostConfig::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                println!(
                    "  {}: {} {}",
                    "block-loader".cyan(),
                    DEFAULT_BLOCK_LOADER,
                    "(default)".dimmed()
                );
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Get { key } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                return Err(ConfigError::UnknownKey(key).into());
            }
            let config = HostConfig::load()?;
            let value = config
                .get(&key)
                .unwrap_or_else(|| DEFAULT_BLOCK_LOADER.to_string());
            logger::debug(&format!("{} resolved from {}", key, HostConfig::path().display()));
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = HostConfig::load()?;
            config.set(&key, value.clone())?;
            config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path => {
            let config_path = HostConfig::path();
            logger::debug(&format!("Reading config from: {}", config_path.display()));
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
