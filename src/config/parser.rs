use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use super::models::MilestoneConfig;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Other(String),
}

/// Provides default configuration file path, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(crate::constants::config::CONFIG_DIR)
            .join(crate::constants::config::CONFIG_FILE)
    })
}

/// Loads and validates the configuration
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<MilestoneConfig, ConfigError> {
    // Open the configuration file
    let mut file = File::open(&config_path).map_err(ConfigError::FileError)?;

    // Read the file content
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(ConfigError::FileError)?;

    parse_config(&content)
}

/// Parses and validates configuration from YAML text
pub fn parse_config(content: &str) -> Result<MilestoneConfig, ConfigError> {
    let config: MilestoneConfig = serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;

    config.validate().map_err(ConfigError::ValidationError)?;

    // Network names are used as lookup keys
    let mut seen = HashSet::new();
    for network in &config.networks {
        if !seen.insert(network.name.as_str()) {
            return Err(ConfigError::Other(format!(
                "Network '{}' is defined more than once",
                network.name
            )));
        }
    }

    Ok(config)
}

/// Loads the configuration from an explicit path, or from the default path
/// when it exists, or falls back to built-in defaults.
///
/// An explicit path that cannot be read is an error.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<MilestoneConfig, ConfigError> {
    if let Some(path) = explicit {
        info!("Using configuration file: {:?}", path);
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Using configuration file: {:?}", path);
            load_config(path)
        }
        _ => {
            debug!("No configuration file found, using defaults");
            Ok(MilestoneConfig::default())
        }
    }
}
