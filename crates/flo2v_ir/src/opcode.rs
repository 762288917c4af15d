//! The closed Flo opcode set and its per-family sub-enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every opcode a Flo operation may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Not,
    Neg,
    Eq,
    Neq,
    Gte,
    Lt,
    Lsh,
    Rsh,
    Rshd,
    Arsh,
    Cat,
    Catd,
    Mov,
    In,
    Out,
    Mux,
    Mem,
    Rd,
    Wr,
    Init,
    Reg,
    Rst,
    Log2,
}

impl Opcode {
    /// All opcodes, in declaration order.
    pub const ALL: [Opcode; 30] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::Neg,
        Opcode::Eq,
        Opcode::Neq,
        Opcode::Gte,
        Opcode::Lt,
        Opcode::Lsh,
        Opcode::Rsh,
        Opcode::Rshd,
        Opcode::Arsh,
        Opcode::Cat,
        Opcode::Catd,
        Opcode::Mov,
        Opcode::In,
        Opcode::Out,
        Opcode::Mux,
        Opcode::Mem,
        Opcode::Rd,
        Opcode::Wr,
        Opcode::Init,
        Opcode::Reg,
        Opcode::Rst,
        Opcode::Log2,
    ];

    /// The mnemonic used in Flo text.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Not => "not",
            Opcode::Neg => "neg",
            Opcode::Eq => "eq",
            Opcode::Neq => "neq",
            Opcode::Gte => "gte",
            Opcode::Lt => "lt",
            Opcode::Lsh => "lsh",
            Opcode::Rsh => "rsh",
            Opcode::Rshd => "rshd",
            Opcode::Arsh => "arsh",
            Opcode::Cat => "cat",
            Opcode::Catd => "catd",
            Opcode::Mov => "mov",
            Opcode::In => "in",
            Opcode::Out => "out",
            Opcode::Mux => "mux",
            Opcode::Mem => "mem",
            Opcode::Rd => "rd",
            Opcode::Wr => "wr",
            Opcode::Init => "init",
            Opcode::Reg => "reg",
            Opcode::Rst => "rst",
            Opcode::Log2 => "log2",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned when a mnemonic names no opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| UnknownOpcode(s.to_string()))
    }
}

/// Two-operand arithmetic, bitwise, and comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Eq,
    Neq,
    Gte,
    Lt,
}

impl BinaryOp {
    /// The Verilog operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
        }
    }

    /// The opcode this operator was read from.
    pub fn opcode(self) -> Opcode {
        match self {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::And => Opcode::And,
            BinaryOp::Or => Opcode::Or,
            BinaryOp::Xor => Opcode::Xor,
            BinaryOp::Eq => Opcode::Eq,
            BinaryOp::Neq => Opcode::Neq,
            BinaryOp::Gte => Opcode::Gte,
            BinaryOp::Lt => Opcode::Lt,
        }
    }
}

/// Single-operand operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    /// The Verilog operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "~",
            UnaryOp::Neg => "-",
        }
    }

    /// The opcode this operator was read from.
    pub fn opcode(self) -> Opcode {
        match self {
            UnaryOp::Not => Opcode::Not,
            UnaryOp::Neg => Opcode::Neg,
        }
    }
}

/// Shift operators. A right shift by a constant is a bit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftOp {
    Lsh,
    Rsh,
    Rshd,
    Arsh,
}

impl ShiftOp {
    /// The Verilog operator symbol for a true (non-constant) shift.
    pub fn symbol(self) -> &'static str {
        match self {
            ShiftOp::Lsh => "<<",
            ShiftOp::Rsh | ShiftOp::Rshd => ">>",
            ShiftOp::Arsh => ">>>",
        }
    }

    /// The opcode this operator was read from.
    pub fn opcode(self) -> Opcode {
        match self {
            ShiftOp::Lsh => Opcode::Lsh,
            ShiftOp::Rsh => Opcode::Rsh,
            ShiftOp::Rshd => Opcode::Rshd,
            ShiftOp::Arsh => Opcode::Arsh,
        }
    }
}

/// Concatenation flavours. Both emit the same Verilog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatOp {
    Cat,
    Catd,
}

impl ConcatOp {
    /// The opcode this operator was read from.
    pub fn opcode(self) -> Opcode {
        match self {
            ConcatOp::Cat => Opcode::Cat,
            ConcatOp::Catd => Opcode::Catd,
        }
    }
}
