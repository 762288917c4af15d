//! Partitioning of a graph's operations into module regions.
//!
//! One pass over the operations in source order. Every bucket keeps that
//! order, so the generated text is a pure function of the graph.

use flo2v_ir::{Graph, OpKind, Operation};

/// Direction of a module port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Defined by an `in` operation.
    Input,
    /// Defined by an `out` operation.
    Output,
}

impl PortDirection {
    /// The Verilog keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

/// The operations of a graph grouped by where they are emitted.
#[derive(Debug, Default)]
pub struct Classified<'g> {
    /// `in` and `out` operations, interleaved as in the source.
    pub ports: Vec<(PortDirection, &'g Operation)>,
    /// `reg` operations.
    pub registers: Vec<&'g Operation>,
    /// `wr` operations.
    pub writes: Vec<&'g Operation>,
    /// `init` operations.
    pub inits: Vec<&'g Operation>,
    /// Operations that declare a wire and drive it with a continuous assignment.
    pub wires: Vec<&'g Operation>,
    /// `out` operations, whose ports are driven by continuous assignments.
    pub outputs: Vec<&'g Operation>,
}

/// Sorts every operation of `graph` into its region.
///
/// `mem` operations land in no bucket; memories are declared from the node
/// list instead.
pub fn classify(graph: &Graph) -> Classified<'_> {
    let mut classified = Classified::default();
    for op in graph.ops.values() {
        match op.kind {
            OpKind::Input => classified.ports.push((PortDirection::Input, op)),
            OpKind::Output { .. } => {
                classified.ports.push((PortDirection::Output, op));
                classified.outputs.push(op);
            }
            OpKind::Register { .. } => classified.registers.push(op),
            OpKind::Write { .. } => classified.writes.push(op),
            OpKind::Init { .. } => classified.inits.push(op),
            OpKind::Memory { .. } => {}
            OpKind::Binary { .. }
            | OpKind::Unary { .. }
            | OpKind::Move { .. }
            | OpKind::Shift { .. }
            | OpKind::Concat { .. }
            | OpKind::Mux { .. }
            | OpKind::Log2 { .. }
            | OpKind::Read { .. }
            | OpKind::Reset => classified.wires.push(op),
        }
    }
    classified
}
