//! Errors raised while loading `flo2v.toml`.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML is malformed or names an unknown key or value.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but holds a value the generators cannot use.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the field, e.g. `testbench.clock_period`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}
