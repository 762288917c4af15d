//! Stimulus actions and the ordered script holding them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// One instruction of a step script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Let the clock run for `cycles` cycles.
    Step {
        /// Number of clock cycles.
        cycles: u64,
    },
    /// Hold reset for `cycles` cycles.
    Reset {
        /// Number of clock cycles.
        cycles: u64,
    },
    /// Drive `module.signal` with a decimal value.
    WirePoke {
        /// The module half of the dotted target.
        module: String,
        /// The signal half of the dotted target.
        signal: String,
        /// Decimal literal, kept as text so no width or radix is lost.
        value: String,
    },
    /// End the simulation.
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Step { cycles } => write!(f, "step {cycles}"),
            Action::Reset { cycles } => write!(f, "reset {cycles}"),
            Action::WirePoke {
                module,
                signal,
                value,
            } => write!(f, "wire_poke {module}.{signal} {value}"),
            Action::Quit => f.write_str("quit"),
        }
    }
}

/// A parsed step script: actions in script order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// The actions, in the order they appear in the file.
    pub actions: Vec<Action>,
}

impl Script {
    /// Writes the script back out, one canonical line per action.
    pub fn dump(&self, out: &mut impl io::Write) -> io::Result<()> {
        for action in &self.actions {
            writeln!(out, "{action}")?;
        }
        Ok(())
    }

    /// Iterates over the actions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the script has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
