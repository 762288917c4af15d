//! Line parser for step scripts.
//!
//! The grammar is whitespace-tokenized with one command per line:
//!
//! ```text
//! step <cycles>
//! reset <cycles>
//! wire_poke <module>.<signal> <value>
//! quit
//! ```
//!
//! Blank lines are skipped. There are no comments or continuation lines.

use crate::action::{Action, Script};
use crate::error::StepError;
use log::debug;
use std::path::Path;

/// Reads and parses the step script at `path`.
pub fn load_step(path: &Path) -> Result<Script, StepError> {
    let content = std::fs::read_to_string(path).map_err(|source| StepError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let script = parse_step(&content)?;
    debug!("parsed {} step actions from {}", script.len(), path.display());
    Ok(script)
}

/// Parses step script text.
pub fn parse_step(source: &str) -> Result<Script, StepError> {
    let mut actions = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        actions.push(parse_line(line).map_err(|reason| StepError::Malformed {
            line: index + 1,
            text: line.to_string(),
            reason,
        })?);
    }
    Ok(Script { actions })
}

fn parse_line(line: &str) -> Result<Action, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (command, args) = parts
        .split_first()
        .ok_or_else(|| "empty line".to_string())?;

    match *command {
        "step" => {
            expect_args(command, args, 1)?;
            Ok(Action::Step {
                cycles: parse_count(args[0])?,
            })
        }
        "reset" => {
            expect_args(command, args, 1)?;
            Ok(Action::Reset {
                cycles: parse_count(args[0])?,
            })
        }
        "wire_poke" => {
            expect_args(command, args, 2)?;
            let (module, signal) = split_target(args[0])?;
            if !is_decimal(args[1]) {
                return Err(format!("value '{}' is not a decimal literal", args[1]));
            }
            Ok(Action::WirePoke {
                module: module.to_string(),
                signal: signal.to_string(),
                value: args[1].to_string(),
            })
        }
        "quit" => {
            expect_args(command, args, 0)?;
            Ok(Action::Quit)
        }
        other => Err(format!("unknown command '{other}'")),
    }
}

fn expect_args(command: &str, args: &[&str], expected: usize) -> Result<(), String> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "'{command}' takes {expected} argument(s), found {}",
            args.len()
        ))
    }
}

fn parse_count(token: &str) -> Result<u64, String> {
    if !is_decimal(token) {
        return Err(format!("cycle count '{token}' is not an unsigned integer"));
    }
    token
        .parse::<u64>()
        .map_err(|_| format!("cycle count '{token}' is out of range"))
}

/// Splits `module.signal`, requiring exactly one dot with text on both sides.
fn split_target(target: &str) -> Result<(&str, &str), String> {
    let mut parts = target.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(module), Some(signal), None) if !module.is_empty() && !signal.is_empty() => {
            Ok((module, signal))
        }
        _ => Err(format!("target '{target}' must have the form <module>.<signal>")),
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}
