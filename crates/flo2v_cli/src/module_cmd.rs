//! `flo2v`: Flo design to Verilog module.

use crate::pipeline::{load_config, write_output};
use crate::GlobalArgs;
use clap::Parser;
use flo2v_ir::load_graph;
use flo2v_verilog::generate_module;
use log::info;
use std::path::PathBuf;

/// Generate a Verilog module from a Flo design.
#[derive(Parser, Debug)]
#[command(name = "flo2v", about = "Generate a Verilog module from a Flo design")]
pub struct ModuleCli {
    /// Common flags.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The design: Flo text, or a serialized graph ending in `.json`.
    pub design: PathBuf,
}

/// Runs `flo2v`, returning the process exit code.
pub fn run(cli: &ModuleCli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(&cli.global)?;
    let graph = load_graph(&cli.design)?;

    let mut buf = Vec::new();
    generate_module(&graph, &config.module, &mut buf)?;
    write_output(cli.global.output.as_deref(), &buf)?;

    info!(
        "generated module from {} ({} operations)",
        cli.design.display(),
        graph.ops.len()
    );
    Ok(0)
}
