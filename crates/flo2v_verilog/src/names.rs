//! Identifier normalization and module/port naming.
//!
//! Flo names are hierarchical (`Top::io_a`, `Top:core:r`). The leading scope
//! names the design itself, so it is dropped and the remaining scopes are
//! joined with `_`. A doubled `::` is one boundary, not an empty scope.

use crate::error::GenError;
use flo2v_config::PortSuffix;
use flo2v_ir::{Graph, Node, SCOPE_DELIMITER};
use std::collections::HashMap;

/// Returns the text used to reference `node` in Verilog.
///
/// Constants with a known width render as sized literals (`4'd3`); every other
/// node renders as a flat identifier.
pub fn node_name(node: &Node) -> String {
    if node.is_const {
        if let Some(width) = node.width {
            return format!("{width}'d{}", node.name);
        }
    }
    normalize(&node.name)
}

/// Flattens a hierarchical name, dropping its leading scope.
///
/// Names without a delimiter come back unchanged, which makes this
/// idempotent on its own output.
pub fn normalize(name: &str) -> String {
    let segments = scope_segments(name);
    if segments.len() == 1 {
        return name.to_string();
    }
    segments[1..].join("_")
}

fn scope_segments(name: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = name;
    while let Some(index) = rest.find(SCOPE_DELIMITER) {
        segments.push(&rest[..index]);
        rest = &rest[index + 1..];
        if let Some(stripped) = rest.strip_prefix(SCOPE_DELIMITER) {
            rest = stripped;
        }
    }
    segments.push(rest);
    segments
}

/// Returns the design name: the leading scope of the first scoped node.
pub fn module_name(graph: &Graph) -> Result<&str, GenError> {
    graph
        .nodes
        .values()
        .find(|node| node.is_scoped())
        .and_then(|node| node.name.split(SCOPE_DELIMITER).next())
        .ok_or(GenError::NoClassName)
}

/// Clock and reset port names of a generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortNames {
    /// The clock input.
    pub clk: String,
    /// The synchronous reset input.
    pub reset: String,
}

impl PortNames {
    /// Derives the clock and reset names from the module name.
    pub fn new(module: &str, suffix: PortSuffix) -> Self {
        let sep = suffix.separator();
        Self {
            clk: format!("{module}{sep}clk"),
            reset: format!("{module}{sep}reset"),
        }
    }
}

/// Fails if two distinct signal names flatten to the same identifier.
///
/// `Top:p:q`, `Top:p::q` and `Top:p_q` all normalize to `p_q`; a design
/// using more than one of them cannot be emitted.
pub fn check_collisions(graph: &Graph) -> Result<(), GenError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for node in graph.nodes.values().filter(|n| !n.is_const) {
        let flat = normalize(&node.name);
        match seen.get(flat.as_str()) {
            Some(first) if *first != node.name => {
                return Err(GenError::NameCollision {
                    first: first.to_string(),
                    second: node.name.clone(),
                    flat,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(flat, &node.name);
            }
        }
    }
    Ok(())
}
