//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::Flo2vConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE: &str = "flo2v.toml";

/// Loads and validates `<project_dir>/flo2v.toml`.
pub fn load_config(project_dir: &Path) -> Result<Flo2vConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<Flo2vConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<Flo2vConfig, ConfigError> {
    let config: Flo2vConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates values the type system cannot express.
pub fn validate_config(config: &Flo2vConfig) -> Result<(), ConfigError> {
    let period = config.testbench.clock_period;
    if period == 0 || period % 2 != 0 {
        return Err(ConfigError::Invalid {
            field: "testbench.clock_period",
            reason: format!("must be a positive even number, got {period}"),
        });
    }
    if config.testbench.timescale.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "testbench.timescale",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
