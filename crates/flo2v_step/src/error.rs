//! Errors raised while reading a step script.

use std::path::PathBuf;

/// Errors that can occur when parsing a step script.
///
/// Both variants are reported before any testbench text is produced.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// The script file could not be opened.
    #[error("step file not found: '{path}': {source}")]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line does not follow the step grammar.
    #[error("malformed step file at line {line} ('{text}'): {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
        /// What is wrong with it.
        reason: String,
    },
}
