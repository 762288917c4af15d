//! Width inference for operations whose result width follows from an operand.
//!
//! Only width-preserving and boolean-valued operations are inferred; an
//! arithmetic result width is a design decision and must be written out.
//! Explicit widths are never overwritten.

use crate::graph::Graph;
use crate::ids::NodeId;
use crate::opcode::BinaryOp;
use crate::operation::OpKind;
use log::trace;

impl Graph {
    /// Fills in missing destination widths until nothing changes.
    ///
    /// Returns the number of nodes that received a width.
    pub fn infer_widths(&mut self) -> usize {
        let mut resolved = 0;
        loop {
            let mut updates: Vec<(NodeId, u32)> = Vec::new();
            for op in self.ops.values() {
                if self.nodes[op.dest].known_width() {
                    continue;
                }
                if let Some(width) = self.implied_width(&op.kind) {
                    updates.push((op.dest, width));
                }
            }
            if updates.is_empty() {
                return resolved;
            }
            for (id, width) in updates {
                let node = self.nodes.get_mut(id);
                if !node.known_width() {
                    trace!("inferred width {width} for '{}'", node.name);
                    node.width = Some(width);
                    resolved += 1;
                }
            }
        }
    }

    fn implied_width(&self, kind: &OpKind) -> Option<u32> {
        let width_of = |id: NodeId| self.nodes[id].width;
        match *kind {
            OpKind::Move { src } | OpKind::Output { src } | OpKind::Unary { src, .. } => {
                width_of(src)
            }
            OpKind::Binary { op, .. }
                if matches!(op, BinaryOp::Eq | BinaryOp::Neq | BinaryOp::Gte | BinaryOp::Lt) =>
            {
                Some(1)
            }
            OpKind::Mux {
                then_val, else_val, ..
            } => width_of(then_val).or_else(|| width_of(else_val)),
            OpKind::Register { reset_value, next } => {
                width_of(next).or_else(|| width_of(reset_value))
            }
            OpKind::Read { mem, .. } => width_of(mem),
            OpKind::Reset => Some(1),
            _ => None,
        }
    }
}
