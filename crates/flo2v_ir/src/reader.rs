//! Readers turning design files into a [`Graph`].
//!
//! Flo text has one operation per line:
//!
//! ```text
//! Top::io_a = in/4
//! Top:sum   = add/4 Top::io_a 1'4
//! Top::io_b = out/4 Top:sum
//! ```
//!
//! An operand made of decimal digits is a constant; `<digits>'<width>` gives
//! the constant a width. `mem/<width> <depth>` declares a memory. Blank lines
//! and lines starting with `#` are ignored.

use crate::error::FloError;
use crate::graph::{Graph, GraphBuilder};
use crate::ids::NodeId;
use crate::opcode::{BinaryOp, ConcatOp, Opcode, ShiftOp, UnaryOp};
use crate::operation::OpKind;
use log::debug;
use std::path::Path;

/// Loads a design from disk.
///
/// Files with a `.json` extension hold a serialized [`Graph`]; everything
/// else is read as Flo text.
pub fn load_graph(path: &Path) -> Result<Graph, FloError> {
    let content = std::fs::read_to_string(path).map_err(|source| FloError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let graph = if is_json {
        let mut graph: Graph = serde_json::from_str(&content)?;
        graph.validate()?;
        graph.infer_widths();
        graph
    } else {
        parse_flo(&content)?
    };
    debug!(
        "loaded {} ({} nodes, {} operations)",
        path.display(),
        graph.nodes.len(),
        graph.ops.len()
    );
    Ok(graph)
}

/// Parses Flo text into a graph, inferring the widths Flo leaves implicit.
pub fn parse_flo(source: &str) -> Result<Graph, FloError> {
    let mut builder = GraphBuilder::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_line(&mut builder, index + 1, line)?;
    }
    let mut graph = builder.build();
    graph.infer_widths();
    Ok(graph)
}

fn parse_line(b: &mut GraphBuilder, line_no: usize, line: &str) -> Result<(), FloError> {
    let malformed = |reason: String| FloError::Malformed {
        line: line_no,
        reason,
    };

    let (lhs, rhs) = line
        .split_once('=')
        .ok_or_else(|| malformed("expected '<dest> = <opcode> ...'".to_string()))?;
    let dest_name = lhs.trim();
    if dest_name.is_empty() || dest_name.contains(char::is_whitespace) {
        return Err(malformed(format!("invalid destination '{dest_name}'")));
    }

    let mut tokens = rhs.split_whitespace();
    let op_token = tokens
        .next()
        .ok_or_else(|| malformed("missing opcode".to_string()))?;
    let (mnemonic, width) = match op_token.split_once('/') {
        Some((m, w)) => {
            let width = w
                .parse::<u32>()
                .map_err(|_| malformed(format!("invalid width '{w}'")))?;
            (m, Some(width))
        }
        None => (op_token, None),
    };
    let opcode: Opcode = mnemonic.parse().map_err(|_| FloError::UnknownOpcode {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = tokens.collect();

    let expected = arity(opcode);
    if operands.len() != expected {
        return Err(FloError::Arity {
            line: line_no,
            opcode: opcode.to_string(),
            expected,
            found: operands.len(),
        });
    }

    if opcode == Opcode::Mem {
        let depth = operands[0]
            .parse::<u32>()
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| malformed(format!("invalid memory depth '{}'", operands[0])))?;
        let dest = b.memory(dest_name, width, depth);
        b.push(dest, OpKind::Memory { depth });
        return Ok(());
    }

    let dest = match width {
        Some(w) => b.signal(dest_name, w),
        None => b.node(dest_name),
    };
    let mut args = Vec::with_capacity(operands.len());
    for token in &operands {
        args.push(operand(b, line_no, token)?);
    }

    b.push(dest, op_kind(opcode, &args));
    Ok(())
}

fn operand(b: &mut GraphBuilder, line_no: usize, token: &str) -> Result<NodeId, FloError> {
    let (literal, width) = match token.split_once('\'') {
        Some((value, width)) => {
            let width = width.parse::<u32>().map_err(|_| FloError::Malformed {
                line: line_no,
                reason: format!("invalid constant width in '{token}'"),
            })?;
            (value, Some(width))
        }
        None => (token, None),
    };
    if is_decimal(literal) {
        Ok(b.constant(literal, width))
    } else if width.is_some() {
        Err(FloError::Malformed {
            line: line_no,
            reason: format!("only constants may carry an inline width: '{token}'"),
        })
    } else {
        Ok(b.node(token))
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

fn arity(opcode: Opcode) -> usize {
    match opcode {
        Opcode::In | Opcode::Rst => 0,
        Opcode::Not
        | Opcode::Neg
        | Opcode::Mov
        | Opcode::Out
        | Opcode::Log2
        | Opcode::Mem => 1,
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Eq
        | Opcode::Neq
        | Opcode::Gte
        | Opcode::Lt
        | Opcode::Lsh
        | Opcode::Rsh
        | Opcode::Rshd
        | Opcode::Arsh
        | Opcode::Cat
        | Opcode::Catd
        | Opcode::Reg => 2,
        Opcode::Mux | Opcode::Rd | Opcode::Init => 3,
        Opcode::Wr => 4,
    }
}

/// Builds the operand shape for `opcode`. `args` has already been checked against [`arity`].
fn op_kind(opcode: Opcode, args: &[NodeId]) -> OpKind {
    let binary = |op| OpKind::Binary {
        op,
        left: args[0],
        right: args[1],
    };
    let shift = |op| OpKind::Shift {
        op,
        src: args[0],
        amount: args[1],
    };
    let concat = |op| OpKind::Concat {
        op,
        high: args[0],
        low: args[1],
    };
    match opcode {
        Opcode::Add => binary(BinaryOp::Add),
        Opcode::Sub => binary(BinaryOp::Sub),
        Opcode::Mul => binary(BinaryOp::Mul),
        Opcode::Div => binary(BinaryOp::Div),
        Opcode::And => binary(BinaryOp::And),
        Opcode::Or => binary(BinaryOp::Or),
        Opcode::Xor => binary(BinaryOp::Xor),
        Opcode::Eq => binary(BinaryOp::Eq),
        Opcode::Neq => binary(BinaryOp::Neq),
        Opcode::Gte => binary(BinaryOp::Gte),
        Opcode::Lt => binary(BinaryOp::Lt),
        Opcode::Not => OpKind::Unary {
            op: UnaryOp::Not,
            src: args[0],
        },
        Opcode::Neg => OpKind::Unary {
            op: UnaryOp::Neg,
            src: args[0],
        },
        Opcode::Lsh => shift(ShiftOp::Lsh),
        Opcode::Rsh => shift(ShiftOp::Rsh),
        Opcode::Rshd => shift(ShiftOp::Rshd),
        Opcode::Arsh => shift(ShiftOp::Arsh),
        Opcode::Cat => concat(ConcatOp::Cat),
        Opcode::Catd => concat(ConcatOp::Catd),
        Opcode::Mov => OpKind::Move { src: args[0] },
        Opcode::In => OpKind::Input,
        Opcode::Out => OpKind::Output { src: args[0] },
        Opcode::Mux => OpKind::Mux {
            cond: args[0],
            then_val: args[1],
            else_val: args[2],
        },
        Opcode::Rd => OpKind::Read {
            enable: args[0],
            mem: args[1],
            addr: args[2],
        },
        Opcode::Wr => OpKind::Write {
            enable: args[0],
            mem: args[1],
            addr: args[2],
            value: args[3],
        },
        Opcode::Init => OpKind::Init {
            mem: args[0],
            addr: args[1],
            value: args[2],
        },
        Opcode::Reg => OpKind::Register {
            reset_value: args[0],
            next: args[1],
        },
        Opcode::Rst => OpKind::Reset,
        Opcode::Log2 => OpKind::Log2 { src: args[0] },
        // handled before operands are resolved
        Opcode::Mem => unreachable!("memory declarations are built in parse_line"),
    }
}
