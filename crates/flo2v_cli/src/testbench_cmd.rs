//! `step2tb`: step script plus Flo design to Verilog testbench.

use crate::pipeline::{load_config, write_output};
use crate::GlobalArgs;
use clap::Parser;
use flo2v_config::validate_config;
use flo2v_ir::load_graph;
use flo2v_step::load_step;
use flo2v_verilog::generate_testbench;
use log::info;
use std::path::PathBuf;

/// Generate a Verilog testbench that replays a step script.
#[derive(Parser, Debug)]
#[command(
    name = "step2tb",
    about = "Generate a Verilog testbench from a step script and a Flo design"
)]
pub struct TestbenchCli {
    /// Common flags.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Clock period in timescale units, overriding the configuration.
    #[arg(long, value_name = "N")]
    pub clock_period: Option<u64>,

    /// Print the parsed step script in canonical form instead of a testbench.
    #[arg(long)]
    pub dump_actions: bool,

    /// The step script.
    pub step: PathBuf,

    /// The design: Flo text, or a serialized graph ending in `.json`.
    pub design: PathBuf,
}

/// Runs `step2tb`, returning the process exit code.
pub fn run(cli: &TestbenchCli) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = load_config(&cli.global)?;
    if let Some(period) = cli.clock_period {
        config.testbench.clock_period = period;
        validate_config(&config)?;
    }

    let script = load_step(&cli.step)?;
    let mut buf = Vec::new();

    if cli.dump_actions {
        script.dump(&mut buf)?;
        write_output(cli.global.output.as_deref(), &buf)?;
        return Ok(0);
    }

    let graph = load_graph(&cli.design)?;
    generate_testbench(&graph, &script, &config, &mut buf)?;
    write_output(cli.global.output.as_deref(), &buf)?;

    info!(
        "generated testbench from {} ({} actions)",
        cli.step.display(),
        script.len()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    const DESIGN: &str = "Top:a = in/4\nTop:b = out Top:a\n";
    const SCRIPT: &str = "reset 1\nwire_poke Top.a 3\nstep 2\nquit\n";

    fn setup(script: &str) -> (TempDir, PathBuf, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let step = tmp.path().join("Top.stp");
        let design = tmp.path().join("Top.flo");
        let output = tmp.path().join("Top_tb.v");
        fs::write(&step, script).unwrap();
        fs::write(&design, DESIGN).unwrap();
        (tmp, step, design, output)
    }

    fn cli(extra: &[&str], step: &PathBuf, design: &PathBuf, output: &PathBuf) -> TestbenchCli {
        let mut args = vec!["step2tb", "-o", output.to_str().unwrap()];
        args.extend_from_slice(extra);
        args.push(step.to_str().unwrap());
        args.push(design.to_str().unwrap());
        TestbenchCli::parse_from(args)
    }

    #[test]
    fn command_is_well_formed() {
        TestbenchCli::command().debug_assert();
    }

    #[test]
    fn parse_positional_order() {
        let cli = TestbenchCli::parse_from(["step2tb", "Top.stp", "Top.flo"]);
        assert_eq!(cli.step, PathBuf::from("Top.stp"));
        assert_eq!(cli.design, PathBuf::from("Top.flo"));
        assert!(cli.clock_period.is_none());
        assert!(!cli.dump_actions);
    }

    #[test]
    fn parse_flags() {
        let cli = TestbenchCli::parse_from([
            "step2tb",
            "--clock-period",
            "20",
            "--dump-actions",
            "-q",
            "Top.stp",
            "Top.flo",
        ]);
        assert_eq!(cli.clock_period, Some(20));
        assert!(cli.dump_actions);
        assert!(cli.global.quiet);
    }

    #[test]
    fn run_writes_testbench() {
        let (_tmp, step, design, output) = setup(SCRIPT);
        assert_eq!(run(&cli(&[], &step, &design, &output)).unwrap(), 0);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("`timescale 1ps/1ps\nmodule Top_tb();\n"));
        assert!(text.contains("\ta <= 4'd3;\n\t#20 $finish;\n"));
    }

    #[test]
    fn clock_period_override() {
        let (_tmp, step, design, output) = setup(SCRIPT);
        run(&cli(&["--clock-period", "4"], &step, &design, &output)).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("always #2 clk = !clk;\n"));
        assert!(text.contains("\t#4 reset <= 0;\n"));
    }

    #[test]
    fn odd_clock_period_rejected() {
        let (_tmp, step, design, output) = setup(SCRIPT);
        let err = run(&cli(&["--clock-period", "5"], &step, &design, &output)).unwrap_err();
        assert!(err.to_string().contains("clock_period"));
        assert!(!output.exists());
    }

    #[test]
    fn dump_actions_prints_script() {
        let (_tmp, step, design, output) = setup("reset   1\n\nwire_poke Top.a 3\nquit\n");
        run(&cli(&["--dump-actions"], &step, &design, &output)).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "reset 1\nwire_poke Top.a 3\nquit\n"
        );
    }

    #[test]
    fn unknown_signal_leaves_no_output() {
        let (_tmp, step, design, output) = setup("wire_poke Top.zz 1\n");
        let err = run(&cli(&[], &step, &design, &output)).unwrap_err();
        assert!(err.to_string().contains("Top.zz"));
        assert!(!output.exists());
    }

    #[test]
    fn malformed_script_reports_line() {
        let (_tmp, step, design, output) = setup("reset 1\npoke Top.a 1\n");
        let err = run(&cli(&[], &step, &design, &output)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
