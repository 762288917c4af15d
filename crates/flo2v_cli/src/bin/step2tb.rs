//! `step2tb`: emit a Verilog testbench replaying a step script.

use std::process;

use clap::{CommandFactory, FromArgMatches};
use flo2v_cli::testbench_cmd::{self, TestbenchCli};
use flo2v_cli::{init_logging, version_text};

fn main() {
    let matches = TestbenchCli::command().version(version_text()).get_matches();
    let cli = TestbenchCli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    init_logging(&cli.global);

    match testbench_cmd::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
