//! Step scripts: the stimulus replayed by generated testbenches.
//!
//! A script is parsed once into an ordered [`Script`] of [`Action`]s. Parsing
//! checks only the grammar; whether a poked signal exists in the design is
//! decided when the testbench is generated.

#![warn(missing_docs)]

pub mod action;
pub mod error;
pub mod parser;

pub use action::{Action, Script};
pub use error::StepError;
pub use parser::{load_step, parse_step};
