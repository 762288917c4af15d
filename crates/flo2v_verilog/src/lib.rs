//! Verilog generation for Flo netlists.
//!
//! [`generate_module`] turns a [`flo2v_ir::Graph`] into a synthesizable
//! single-clock Verilog module, and [`generate_testbench`] wraps the same
//! design in a testbench that replays a [`flo2v_step::Script`]. Both write
//! into any [`std::io::Write`] and stop at the first [`GenError`].

#![warn(missing_docs)]

pub mod classify;
pub mod error;
pub mod expr;
pub mod module;
pub mod names;
pub mod testbench;

pub use classify::{classify, Classified, PortDirection};
pub use error::GenError;
pub use expr::ExprEmitter;
pub use module::{generate_module, render_module};
pub use names::{check_collisions, module_name, node_name, normalize, PortNames};
pub use testbench::{generate_testbench, render_testbench};
