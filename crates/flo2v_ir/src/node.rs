//! Signal nodes.
//!
//! A [`Node`] is one named value in a Flo design: an ordinary signal, a literal
//! constant, or a memory. Names are hierarchical, with `:` separating scopes
//! (`Top:io_a`, `Top::io_a`, `Top:core:r`).

use serde::{Deserialize, Serialize};

/// The scoping delimiter used in hierarchical node names.
pub const SCOPE_DELIMITER: char = ':';

/// A single signal, constant, or memory in the IR graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Hierarchical name. For constants, the literal's decimal text.
    pub name: String,
    /// Bit width, if it has been resolved.
    #[serde(default)]
    pub width: Option<u32>,
    /// `true` if this node is a literal constant.
    #[serde(default)]
    pub is_const: bool,
    /// Number of addressable words. Present only on memory nodes.
    #[serde(default)]
    pub depth: Option<u32>,
}

impl Node {
    /// Creates an ordinary signal node.
    pub fn signal(name: impl Into<String>, width: Option<u32>) -> Self {
        Self {
            name: name.into(),
            width,
            is_const: false,
            depth: None,
        }
    }

    /// Creates a constant node whose name is the literal's decimal text.
    pub fn constant(literal: impl Into<String>, width: Option<u32>) -> Self {
        Self {
            name: literal.into(),
            width,
            is_const: true,
            depth: None,
        }
    }

    /// Creates a memory node of `depth` words, each `width` bits wide.
    pub fn memory(name: impl Into<String>, width: Option<u32>, depth: u32) -> Self {
        Self {
            name: name.into(),
            width,
            is_const: false,
            depth: Some(depth),
        }
    }

    /// Returns `true` if this node is backed by a memory.
    pub fn is_mem(&self) -> bool {
        self.depth.is_some()
    }

    /// Returns `true` if the node's width is resolved.
    pub fn known_width(&self) -> bool {
        self.width.is_some()
    }

    /// Returns `true` if the name contains a scoping delimiter.
    pub fn is_scoped(&self) -> bool {
        self.name.contains(SCOPE_DELIMITER)
    }
}
