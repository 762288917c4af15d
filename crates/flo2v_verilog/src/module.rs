//! Verilog module generation.
//!
//! The module is written region by region: port list, memory arrays,
//! register and wire declarations, continuous assignments, then a single
//! clocked block holding reset values, memory initializers, register updates
//! and memory writes.

use crate::classify::classify;
use crate::error::GenError;
use crate::expr::ExprEmitter;
use crate::names::{check_collisions, module_name, node_name, PortNames};
use flo2v_config::ModuleConfig;
use flo2v_ir::{Graph, Opcode};
use log::debug;
use std::io::Write;

/// Writes the Verilog module for `graph` to `out`.
///
/// On error, whatever was already written is incomplete and should be
/// discarded; see [`render_module`] for a buffered variant.
pub fn generate_module<W: Write>(
    graph: &Graph,
    config: &ModuleConfig,
    out: &mut W,
) -> Result<(), GenError> {
    let module = module_name(graph)?;
    let ports = PortNames::new(module, config.port_suffix);
    let emitter = ExprEmitter::new(graph, &ports.reset, config.log2_base);
    check_collisions(graph)?;
    let classified = classify(graph);
    debug!(
        "module {module}: {} ports, {} registers, {} wires, {} writes, {} inits",
        classified.ports.len(),
        classified.registers.len(),
        classified.wires.len(),
        classified.writes.len(),
        classified.inits.len()
    );

    write!(out, "module {module}(\n\tinput {},\n\tinput {}", ports.clk, ports.reset)?;
    for (direction, op) in &classified.ports {
        emitter.check_widths(op)?;
        write!(
            out,
            ",\n\t{} {} {}",
            direction.keyword(),
            emitter.range(op.dest, op.opcode())?,
            emitter.name(op.dest)
        )?;
    }
    writeln!(out, "\n);")?;

    for node_id in graph.nodes.iter().filter(|(_, n)| n.is_mem()).map(|(id, _)| id) {
        let depth = graph.node(node_id).depth.unwrap_or(1);
        writeln!(
            out,
            "reg {} {} [{}:0];",
            emitter.range(node_id, Opcode::Mem)?,
            node_name(graph.node(node_id)),
            depth.saturating_sub(1)
        )?;
    }

    for op in &classified.registers {
        emitter.check_widths(op)?;
        writeln!(
            out,
            "reg {} {};",
            emitter.range(op.dest, op.opcode())?,
            emitter.name(op.dest)
        )?;
    }
    for op in &classified.wires {
        emitter.check_widths(op)?;
        writeln!(
            out,
            "wire {} {};",
            emitter.range(op.dest, op.opcode())?,
            emitter.name(op.dest)
        )?;
    }

    for op in classified.wires.iter().chain(&classified.outputs) {
        writeln!(out, "{}", emitter.assign(op)?)?;
    }

    writeln!(out, "always @(posedge {}) begin", ports.clk)?;
    writeln!(out, "\tif ({}) begin", ports.reset)?;
    for op in &classified.registers {
        if let Some(line) = emitter.register_reset(op) {
            writeln!(out, "\t\t{line}")?;
        }
    }
    for op in &classified.inits {
        emitter.check_widths(op)?;
        if let Some(line) = emitter.init(op) {
            writeln!(out, "\t\t{line}")?;
        }
    }
    writeln!(out, "\tend else begin")?;
    for op in &classified.registers {
        if let Some(line) = emitter.register_next(op) {
            writeln!(out, "\t\t{line}")?;
        }
    }
    for op in &classified.writes {
        emitter.check_widths(op)?;
        if let Some(line) = emitter.write(op) {
            writeln!(out, "\t\t{line}")?;
        }
    }
    writeln!(out, "\tend")?;
    writeln!(out, "end")?;
    writeln!(out, "endmodule")?;
    Ok(())
}

/// Generates the module into a `String`, returning nothing on failure.
pub fn render_module(graph: &Graph, config: &ModuleConfig) -> Result<String, GenError> {
    let mut buf = Vec::new();
    generate_module(graph, config, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flo2v_config::{Log2Base, PortSuffix};
    use flo2v_ir::parse_flo;

    fn render(source: &str) -> String {
        render_module(&parse_flo(source).unwrap(), &ModuleConfig::default()).unwrap()
    }

    #[test]
    fn passthrough_module() {
        let text = render("Top:a = in/4\nTop:b = out/4 Top:a\n");
        assert_eq!(
            text,
            "module Top(\n\
             \tinput Top_clk,\n\
             \tinput Top_reset,\n\
             \tinput [3:0] a,\n\
             \toutput [3:0] b\n\
             );\n\
             assign b = a;\n\
             always @(posedge Top_clk) begin\n\
             \tif (Top_reset) begin\n\
             \tend else begin\n\
             \tend\n\
             end\n\
             endmodule\n"
        );
    }

    #[test]
    fn register_branches() {
        let text = render(
            "Top:zero = in/4\n\
             Top:n = in/4\n\
             Top:r = reg/4 Top:zero Top:n\n",
        );
        assert!(text.contains("reg [3:0] r;\n"));
        assert!(text.contains("\tif (Top_reset) begin\n\t\tr <= zero;\n\tend else begin\n\t\tr <= n;\n\tend\n"));
    }

    #[test]
    fn memory_regions() {
        let text = render(
            "Top:ram = mem/8 16\n\
             Top:en = in/1\n\
             Top:ad = in/4\n\
             Top:d = in/8\n\
             Top:w = wr/1 Top:en Top:ram Top:ad Top:d\n\
             Top:i = init/1 Top:ram 0 5'8\n\
             Top:q = rd/8 1'1 Top:ram Top:ad\n\
             Top:o = out/8 Top:q\n",
        );
        assert!(text.contains("reg [7:0] ram [15:0];\n"));
        assert!(text.contains("wire [7:0] q;\nassign q = ram[ad];\nassign o = q;\n"));
        assert!(text.contains("\tif (Top_reset) begin\n\t\tram[0] <= 8'd5;\n"));
        assert!(text.contains("\tend else begin\n\t\tif (en) ram[ad] <= d;\n"));
    }

    #[test]
    fn declaration_order_registers_then_wires() {
        let text = render(
            "Top:a = in/4\n\
             Top:t = add/4 Top:a Top:r\n\
             Top:r = reg/4 0'4 Top:t\n",
        );
        let reg = text.find("reg [3:0] r;").unwrap();
        let wire = text.find("wire [3:0] t;").unwrap();
        let assign = text.find("assign t = a + r;").unwrap();
        assert!(reg < wire && wire < assign);
        assert!(text.contains("\t\tr <= 4'd0;\n"));
    }

    #[test]
    fn double_suffix_ports() {
        let config = ModuleConfig {
            port_suffix: PortSuffix::Double,
            log2_base: Log2Base::One,
        };
        let g = parse_flo("Top:r = rst/1\n").unwrap();
        let text = render_module(&g, &config).unwrap();
        assert!(text.contains("\tinput Top__clk,\n\tinput Top__reset\n);\n"));
        assert!(text.contains("assign r = Top__reset;"));
        assert!(text.contains("always @(posedge Top__clk) begin"));
    }

    #[test]
    fn missing_scope_fails() {
        let g = parse_flo("a = in/1\n").unwrap();
        let err = render_module(&g, &ModuleConfig::default()).unwrap_err();
        assert!(matches!(err, GenError::NoClassName));
    }

    #[test]
    fn missing_width_fails() {
        let g = parse_flo("Top:a = in/4\nTop:p = mul Top:a Top:a\nTop:b = out/8 Top:p\n").unwrap();
        let err = render_module(&g, &ModuleConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::UnresolvedWidth {
                opcode: Opcode::Out,
                ..
            }
        ));
    }

    #[test]
    fn colliding_names_fail_before_output() {
        let g = parse_flo(
            "Top:a = in/1\n\
             Top:p:q = not/1 Top:a\n\
             Top:p::q = not/1 Top:a\n\
             Top:p_q = not/1 Top:a\n",
        )
        .unwrap();
        let mut buf = Vec::new();
        let err = generate_module(&g, &ModuleConfig::default(), &mut buf).unwrap_err();
        assert!(matches!(err, GenError::NameCollision { ref flat, .. } if flat == "p_q"));
        assert!(buf.is_empty());
    }

    #[test]
    fn each_statement_once() {
        let text = render(
            "Top:a = in/4\n\
             Top:x = not/4 Top:a\n\
             Top:b = out/4 Top:x\n",
        );
        assert_eq!(text.matches("assign x = ~a;").count(), 1);
        assert_eq!(text.matches("assign b = x;").count(), 1);
    }
}
