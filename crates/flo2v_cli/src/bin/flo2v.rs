//! `flo2v`: emit a Verilog module for a Flo design.

use std::process;

use clap::{CommandFactory, FromArgMatches};
use flo2v_cli::module_cmd::{self, ModuleCli};
use flo2v_cli::{init_logging, version_text};

fn main() {
    let matches = ModuleCli::command().version(version_text()).get_matches();
    let cli = ModuleCli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    init_logging(&cli.global);

    match module_cmd::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
