//! Shared plumbing for the `flo2v` and `step2tb` command-line tools.
//!
//! `flo2v` turns a Flo design into a Verilog module; `step2tb` turns a step
//! script plus the same design into a Verilog testbench. Both render into
//! memory first and only touch the output file once generation succeeded.

#![warn(missing_docs)]

pub mod module_cmd;
pub mod pipeline;
pub mod testbench_cmd;

use clap::Args;
use log::LevelFilter;
use std::path::PathBuf;

/// Flags common to both tools.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Write the result to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a `flo2v.toml` configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// The log level selected by `--quiet`/`--verbose`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

/// Installs the stderr logger. `RUST_LOG` overrides the flag-derived level.
pub fn init_logging(global: &GlobalArgs) {
    let _ = env_logger::Builder::new()
        .filter_level(global.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Text printed after the tool name by `--version`.
pub fn version_text() -> String {
    format!(
        "{} (using flo2v_ir {})",
        env!("CARGO_PKG_VERSION"),
        flo2v_ir::VERSION
    )
}
