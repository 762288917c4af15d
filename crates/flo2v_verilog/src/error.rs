//! Errors that abort Verilog generation.
//!
//! None of these have a fallback: the generator stops and any text already
//! written to the sink must be discarded.

use flo2v_ir::Opcode;
use std::io;

/// Errors raised while generating a module or testbench.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// No node name carries a scope, so the module name cannot be derived.
    #[error("could not find class name: no node has a scoped name")]
    NoClassName,

    /// A node's width was needed but never resolved.
    #[error("unknown width of node '{node}' in '{opcode}' operation")]
    UnresolvedWidth {
        /// The node's name as written in the IR.
        node: String,
        /// The opcode being emitted.
        opcode: Opcode,
    },

    /// A node was declared zero bits wide.
    #[error("node '{node}' has zero width")]
    ZeroWidth {
        /// The node's name as written in the IR.
        node: String,
    },

    /// A constant used as a bit offset is not an unsigned integer.
    #[error("constant '{node}' used as a bit offset in '{opcode}' is not an unsigned integer")]
    InvalidConstant {
        /// The constant's literal text.
        node: String,
        /// The opcode being emitted.
        opcode: Opcode,
    },

    /// A `wire_poke` names a signal that is not an input of the design.
    #[error("wire_poke target '{module}.{signal}' is not an input of the design")]
    UnknownSignal {
        /// Module half of the target.
        module: String,
        /// Signal half of the target.
        signal: String,
    },

    /// Two distinct IR names flatten to the same Verilog identifier.
    #[error("'{first}' and '{second}' both normalize to '{flat}'")]
    NameCollision {
        /// The name that claimed the identifier first.
        first: String,
        /// The later name that collides with it.
        second: String,
        /// The shared identifier.
        flat: String,
    },

    /// A `step` or `reset` count times the clock period does not fit in 64 bits.
    #[error("delay of '{action}' at clock period {period} overflows")]
    DelayOverflow {
        /// The action as written in the script.
        action: String,
        /// The clock period in timescale units.
        period: u64,
    },

    /// A clocked or structural operation was routed to the combinational region.
    #[error("'{opcode}' operation defining '{node}' has no continuous-assignment form")]
    NotCombinational {
        /// The opcode of the operation.
        opcode: Opcode,
        /// The destination node's name.
        node: String,
    },

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unresolved_width() {
        let err = GenError::UnresolvedWidth {
            node: "Top:x".to_string(),
            opcode: Opcode::Add,
        };
        assert_eq!(
            err.to_string(),
            "unknown width of node 'Top:x' in 'add' operation"
        );
    }

    #[test]
    fn display_unknown_signal() {
        let err = GenError::UnknownSignal {
            module: "Top".to_string(),
            signal: "nope".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wire_poke target 'Top.nope' is not an input of the design"
        );
    }

    #[test]
    fn display_delay_overflow() {
        let err = GenError::DelayOverflow {
            action: "step 18446744073709551615".to_string(),
            period: 10,
        };
        assert_eq!(
            err.to_string(),
            "delay of 'step 18446744073709551615' at clock period 10 overflows"
        );
    }

    #[test]
    fn display_no_class_name() {
        assert!(GenError::NoClassName
            .to_string()
            .starts_with("could not find class name"));
    }
}
