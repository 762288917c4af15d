//! The IR graph and its builder.
//!
//! A [`Graph`] is built once by a reader and then only borrowed. Nodes and
//! operations keep the order in which they were first mentioned, which is the
//! order every generator walks them in.

use crate::arena::Arena;
use crate::error::FloError;
use crate::ids::{NodeId, OpId};
use crate::node::Node;
use crate::operation::{OpKind, Operation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A flat Flo netlist: signal nodes plus the operations defining them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// All nodes, in first-mention order.
    pub nodes: Arena<NodeId, Node>,
    /// All operations, in source order.
    pub ops: Arena<OpId, Operation>,
}

impl Graph {
    /// Returns the node with the given ID.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Checks that every node referenced by an operation exists in this graph.
    ///
    /// Graphs produced by [`GraphBuilder`] always pass; deserialized graphs may not.
    pub fn validate(&self) -> Result<(), FloError> {
        for (op_id, op) in self.ops.iter() {
            let referenced = std::iter::once(op.dest).chain(op.operands());
            for node in referenced {
                if !self.nodes.contains(node) {
                    return Err(FloError::DanglingNode { op: op_id, node });
                }
            }
            if let OpKind::Memory { depth } = op.kind {
                if self.nodes[op.dest].depth != Some(depth) {
                    return Err(FloError::MemoryDepth {
                        name: self.nodes[op.dest].name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Incrementally builds a [`Graph`], interning nodes by name.
///
/// Signals are created on first mention, possibly before their width is
/// known, and pick up the width when their defining operation supplies one.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    signals: HashMap<String, NodeId>,
    constants: HashMap<(String, Option<u32>), NodeId>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signal named `name`, creating it with an unknown width if needed.
    pub fn node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.signals.get(name) {
            return id;
        }
        let id = self.graph.nodes.alloc(Node::signal(name, None));
        self.signals.insert(name.to_string(), id);
        id
    }

    /// Returns the signal named `name` and records its width.
    pub fn signal(&mut self, name: &str, width: u32) -> NodeId {
        let id = self.node(name);
        self.graph.nodes.get_mut(id).width = Some(width);
        id
    }

    /// Returns the memory named `name`, marking it with `depth` words.
    pub fn memory(&mut self, name: &str, width: Option<u32>, depth: u32) -> NodeId {
        let id = self.node(name);
        let node = self.graph.nodes.get_mut(id);
        node.depth = Some(depth);
        if width.is_some() {
            node.width = width;
        }
        id
    }

    /// Returns the constant with this literal text and width.
    ///
    /// Equal literals of different widths are distinct nodes.
    pub fn constant(&mut self, literal: &str, width: Option<u32>) -> NodeId {
        let key = (literal.to_string(), width);
        if let Some(&id) = self.constants.get(&key) {
            return id;
        }
        let id = self.graph.nodes.alloc(Node::constant(literal, width));
        self.constants.insert(key, id);
        id
    }

    /// Appends an operation.
    pub fn push(&mut self, dest: NodeId, kind: OpKind) -> OpId {
        self.graph.ops.alloc(Operation::new(dest, kind))
    }

    /// Finishes building.
    pub fn build(self) -> Graph {
        self.graph
    }
}
