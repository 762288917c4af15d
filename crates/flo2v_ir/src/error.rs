//! Errors raised while reading a design into a [`Graph`](crate::Graph).

use crate::ids::{NodeId, OpId};
use std::path::PathBuf;

/// Errors that can occur when loading or validating an IR graph.
#[derive(Debug, thiserror::Error)]
pub enum FloError {
    /// The design file could not be read.
    #[error("failed to read design '{path}': {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line does not follow `<dest> = <opcode>[/<width>] <operand>...`.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// The opcode mnemonic is not part of the Flo opcode set.
    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownOpcode {
        /// 1-based line number.
        line: usize,
        /// The unrecognized mnemonic.
        mnemonic: String,
    },

    /// The opcode received the wrong number of operands.
    #[error("line {line}: '{opcode}' expects {expected} operand(s), found {found}")]
    Arity {
        /// 1-based line number.
        line: usize,
        /// The opcode mnemonic.
        opcode: String,
        /// Operand count the opcode takes.
        expected: usize,
        /// Operand count the line supplied.
        found: usize,
    },

    /// A serialized graph could not be decoded.
    #[error("failed to decode design: {0}")]
    Json(#[from] serde_json::Error),

    /// An operation references a node that is not in the graph.
    #[error("operation {op} references missing node {node}")]
    DanglingNode {
        /// The offending operation.
        op: OpId,
        /// The missing node.
        node: NodeId,
    },

    /// A memory declaration disagrees with its node's depth.
    #[error("memory '{name}' is declared with a depth its node does not carry")]
    MemoryDepth {
        /// The memory node's name.
        name: String,
    },
}
