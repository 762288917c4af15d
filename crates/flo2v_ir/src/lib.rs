//! The Flo netlist IR consumed by the `flo2v` generators.
//!
//! A [`Graph`] is a flat list of [`Node`]s (signals, constants, memories) and
//! the [`Operation`]s defining them, both stored in append-only [`Arena`]s and
//! addressed by [`NodeId`]/[`OpId`]. Graphs are read from Flo text or JSON
//! with [`load_graph`], or assembled directly with a [`GraphBuilder`].

pub mod arena;
pub mod error;
pub mod graph;
pub mod ids;
mod infer;
pub mod node;
pub mod opcode;
pub mod operation;
pub mod reader;

pub use arena::{Arena, ArenaId};
pub use error::FloError;
pub use graph::{Graph, GraphBuilder};
pub use ids::{NodeId, OpId};
pub use node::{Node, SCOPE_DELIMITER};
pub use opcode::{BinaryOp, ConcatOp, Opcode, ShiftOp, UnaryOp};
pub use operation::{OpKind, Operation};
pub use reader::{load_graph, parse_flo};

/// Version of the IR library, reported by the command-line tools.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
