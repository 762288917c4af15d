//! Parsing and validation of `flo2v.toml` generator configuration.
//!
//! The configuration selects between the canonical and legacy output
//! conventions (port suffixes, testbench drive style, `log2` base case) and
//! sets the testbench clock period and timescale.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, validate_config, CONFIG_FILE};
pub use types::*;
