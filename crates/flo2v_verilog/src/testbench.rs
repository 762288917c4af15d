//! Verilog testbench generation from a stimulus script.
//!
//! The testbench instantiates the design, drives a free-running clock, and
//! replays the script's actions in order inside one `initial` block. A
//! `step` becomes a delay on the statement that follows it.

use crate::classify::{classify, PortDirection};
use crate::error::GenError;
use crate::expr::ExprEmitter;
use crate::names::{check_collisions, module_name, PortNames};
use flo2v_config::Flo2vConfig;
use flo2v_ir::Graph;
use flo2v_step::{Action, Script};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::Write;

/// A design port as seen from the testbench.
struct TbPort {
    name: String,
    range: String,
    width: u32,
    is_input: bool,
}

fn collect_ports(graph: &Graph, emitter: &ExprEmitter<'_>) -> Result<Vec<TbPort>, GenError> {
    classify(graph)
        .ports
        .into_iter()
        .map(|(direction, op)| {
            Ok(TbPort {
                name: emitter.name(op.dest),
                range: emitter.range(op.dest, op.opcode())?,
                width: emitter.width(op.dest, op.opcode())?,
                is_input: direction == PortDirection::Input,
            })
        })
        .collect()
}

/// The delay of `cycles` clock periods, or an error naming `action` if it overflows.
fn cycles_delay(action: &Action, cycles: u64, period: u64) -> Result<u64, GenError> {
    cycles
        .checked_mul(period)
        .ok_or_else(|| GenError::DelayOverflow {
            action: action.to_string(),
            period,
        })
}

/// Accumulates `#N ` delays until the next statement is written.
struct Stimulus<'w, W: Write> {
    out: &'w mut W,
    pending: String,
}

impl<W: Write> Stimulus<'_, W> {
    fn delay(&mut self, time: u64) {
        self.pending.push_str(&format!("#{time} "));
    }

    fn statement(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "\t{}{text}", self.pending)?;
        self.pending.clear();
        Ok(())
    }

    /// Emits any trailing delay as a null statement so simulated time still advances.
    fn finish(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            let delay = self.pending.trim_end().to_string();
            self.pending.clear();
            writeln!(self.out, "\t{delay};")?;
        }
        Ok(())
    }
}

/// Writes a testbench for the design in `graph` that replays `script`.
pub fn generate_testbench<W: Write>(
    graph: &Graph,
    script: &Script,
    config: &Flo2vConfig,
    out: &mut W,
) -> Result<(), GenError> {
    let module = module_name(graph)?;
    check_collisions(graph)?;
    let names = PortNames::new(module, config.module.port_suffix);
    let emitter = ExprEmitter::new(graph, &names.reset, config.module.log2_base);
    let ports = collect_ports(graph, &emitter)?;
    let inputs: HashMap<&str, u32> = ports
        .iter()
        .filter(|p| p.is_input)
        .map(|p| (p.name.as_str(), p.width))
        .collect();

    let tb = &config.testbench;
    let period = tb.clock_period;
    let assign = tb.drive.operator();
    debug!(
        "testbench {module}_tb: {} ports, {} actions, period {period}",
        ports.len(),
        script.len()
    );

    writeln!(out, "`timescale {}", tb.timescale)?;
    writeln!(out, "module {module}_tb();")?;
    writeln!(out, "reg clk;")?;
    writeln!(out, "reg reset;")?;
    writeln!(out, "initial clk = 1'b1;")?;
    writeln!(out, "always #{} clk = !clk;", period / 2)?;
    for p in ports.iter().filter(|p| p.is_input) {
        writeln!(out, "reg {} {};", p.range, p.name)?;
    }
    for p in ports.iter().filter(|p| !p.is_input) {
        writeln!(out, "wire {} {};", p.range, p.name)?;
    }

    write!(
        out,
        "{module} {module} (\n\t.{} (clk),\n\t.{} (reset)",
        names.clk, names.reset
    )?;
    for p in &ports {
        write!(out, ",\n\t.{0} ({0})", p.name)?;
    }
    writeln!(out, "\n);")?;

    let dumped = ports
        .iter()
        .map(|p| format!(", {module}.{}", p.name))
        .collect::<String>();

    writeln!(out, "initial begin")?;
    let mut stim = Stimulus {
        out: &mut *out,
        pending: String::new(),
    };
    for action in script {
        match action {
            Action::Step { cycles } => stim.delay(cycles_delay(action, *cycles, period)?),
            Action::Reset { cycles } => {
                let delay = cycles_delay(action, *cycles, period)?;
                stim.statement(&format!("reset {assign} 1;"))?;
                stim.delay(delay);
                stim.statement(&format!("reset {assign} 0;"))?;
                stim.statement(&format!("$dumpfile(\"{module}-test.vcd\");"))?;
                stim.statement(&format!("$dumpvars(1{dumped});"))?;
            }
            Action::WirePoke {
                module: target,
                signal,
                value,
            } => {
                if target != module {
                    warn!("wire_poke targets module '{target}' but the design is '{module}'");
                }
                let width =
                    inputs
                        .get(signal.as_str())
                        .ok_or_else(|| GenError::UnknownSignal {
                            module: target.clone(),
                            signal: signal.clone(),
                        })?;
                stim.statement(&format!("{signal} {assign} {width}'d{value};"))?;
            }
            Action::Quit => stim.statement("$finish;")?,
        }
    }
    stim.finish()?;
    writeln!(out, "end")?;
    writeln!(out, "endmodule")?;
    Ok(())
}

/// Generates the testbench into a `String`, returning nothing on failure.
pub fn render_testbench(
    graph: &Graph,
    script: &Script,
    config: &Flo2vConfig,
) -> Result<String, GenError> {
    let mut buf = Vec::new();
    generate_testbench(graph, script, config, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
