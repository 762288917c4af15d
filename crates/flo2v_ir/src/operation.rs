//! Operations and their typed operand shapes.
//!
//! Flo itself passes operands positionally; here each opcode family gets a
//! shape with named fields so that, say, a memory write cannot be confused
//! with a multiplexer.

use crate::ids::NodeId;
use crate::opcode::{BinaryOp, ConcatOp, Opcode, ShiftOp, UnaryOp};
use serde::{Deserialize, Serialize};

/// A single IR instruction: a destination node and an operand shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The node this operation defines.
    pub dest: NodeId,
    /// The opcode family and its operands.
    pub kind: OpKind,
}

/// Operand shapes, one per opcode family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OpKind {
    /// Arithmetic, bitwise, or comparison operator.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Bitwise NOT or arithmetic negation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// Operand.
        src: NodeId,
    },
    /// Plain copy.
    Move {
        /// Source node.
        src: NodeId,
    },
    /// Left or right shift.
    Shift {
        /// The shift flavour.
        op: ShiftOp,
        /// Value being shifted.
        src: NodeId,
        /// Shift amount. A constant right shift selects bits.
        amount: NodeId,
    },
    /// Concatenation, `high` in the most significant bits.
    Concat {
        /// The concatenation flavour.
        op: ConcatOp,
        /// Most significant part.
        high: NodeId,
        /// Least significant part.
        low: NodeId,
    },
    /// Two-way multiplexer.
    Mux {
        /// Select condition.
        cond: NodeId,
        /// Value when `cond` is true.
        then_val: NodeId,
        /// Value when `cond` is false.
        else_val: NodeId,
    },
    /// Index of the highest set bit of `src`.
    Log2 {
        /// Operand.
        src: NodeId,
    },
    /// Module input port.
    Input,
    /// Module output port driven by `src`.
    Output {
        /// The value driven onto the port.
        src: NodeId,
    },
    /// Memory declaration. The destination node carries the depth too.
    Memory {
        /// Number of words.
        depth: u32,
    },
    /// Combinational memory read.
    Read {
        /// Read enable as written in the IR. Reads are asynchronous, so it is not emitted.
        enable: NodeId,
        /// The memory node.
        mem: NodeId,
        /// Word address.
        addr: NodeId,
    },
    /// Clocked memory write.
    Write {
        /// Write enable.
        enable: NodeId,
        /// The memory node.
        mem: NodeId,
        /// Word address.
        addr: NodeId,
        /// Data written.
        value: NodeId,
    },
    /// Memory word initialized while reset is held.
    Init {
        /// The memory node.
        mem: NodeId,
        /// Word address, a literal index.
        addr: NodeId,
        /// Initial value.
        value: NodeId,
    },
    /// Clocked register.
    Register {
        /// Value loaded while reset is asserted.
        reset_value: NodeId,
        /// Value loaded on every other clock edge.
        next: NodeId,
    },
    /// Ties the destination to the module's reset input.
    Reset,
}

impl Operation {
    /// Creates an operation.
    pub fn new(dest: NodeId, kind: OpKind) -> Self {
        Self { dest, kind }
    }

    /// Returns the opcode this operation was read from.
    pub fn opcode(&self) -> Opcode {
        match self.kind {
            OpKind::Binary { op, .. } => op.opcode(),
            OpKind::Unary { op, .. } => op.opcode(),
            OpKind::Move { .. } => Opcode::Mov,
            OpKind::Shift { op, .. } => op.opcode(),
            OpKind::Concat { op, .. } => op.opcode(),
            OpKind::Mux { .. } => Opcode::Mux,
            OpKind::Log2 { .. } => Opcode::Log2,
            OpKind::Input => Opcode::In,
            OpKind::Output { .. } => Opcode::Out,
            OpKind::Memory { .. } => Opcode::Mem,
            OpKind::Read { .. } => Opcode::Rd,
            OpKind::Write { .. } => Opcode::Wr,
            OpKind::Init { .. } => Opcode::Init,
            OpKind::Register { .. } => Opcode::Reg,
            OpKind::Reset => Opcode::Rst,
        }
    }

    /// Returns the operand nodes in Flo's positional order, excluding the destination.
    pub fn operands(&self) -> Vec<NodeId> {
        match self.kind {
            OpKind::Binary { left, right, .. } => vec![left, right],
            OpKind::Unary { src, .. }
            | OpKind::Move { src }
            | OpKind::Log2 { src }
            | OpKind::Output { src } => vec![src],
            OpKind::Shift { src, amount, .. } => vec![src, amount],
            OpKind::Concat { high, low, .. } => vec![high, low],
            OpKind::Mux {
                cond,
                then_val,
                else_val,
            } => vec![cond, then_val, else_val],
            OpKind::Input | OpKind::Memory { .. } | OpKind::Reset => Vec::new(),
            OpKind::Read { enable, mem, addr } => vec![enable, mem, addr],
            OpKind::Write {
                enable,
                mem,
                addr,
                value,
            } => vec![enable, mem, addr, value],
            OpKind::Init { mem, addr, value } => vec![mem, addr, value],
            OpKind::Register { reset_value, next } => vec![reset_value, next],
        }
    }
}
