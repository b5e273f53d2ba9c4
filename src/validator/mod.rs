//! Structural validation of an approval flow before it is saved.
//!
//! Validation never fails: every problem is collected into a
//! [`ValidationResult`]. Errors block the save, warnings are advisory.

mod cycle;
mod depth;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ValidationConfig,
    flow::{Edge, Node, NodeData, NodeType, adjacency::Adjacency},
};

/// Outcome of validating a flow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn new(
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validate with the default limits.
pub fn validate(
    nodes: &[Node],
    edges: &[Edge],
) -> ValidationResult {
    Validator::default().validate(nodes, edges)
}

/// Flow validator with configurable limits.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(
        &self,
        nodes: &[Node],
        edges: &[Edge],
    ) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if nodes.is_empty() {
            errors.push("flow must have at least one node".to_string());
            return ValidationResult::new(errors, warnings);
        }

        let count = |kind: NodeType| nodes.iter().filter(|n| n.is(kind)).count();
        let starts = count(NodeType::Start);
        if starts == 0 {
            errors.push("flow must have a start node".to_string());
        }
        if count(NodeType::End) == 0 {
            errors.push("flow must have an end node".to_string());
        }
        if count(NodeType::Approval) == 0 {
            errors.push("flow must have at least one approval node".to_string());
        }

        let start = nodes.iter().find(|n| n.is(NodeType::Start));
        if starts > 1 {
            let first = start.map(Node::label).unwrap_or_default();
            warnings.push(format!("flow has {} start nodes, only the first one ({}) is used", starts, first));
        }

        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in edges.iter() {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    warnings.push(format!("edge {} references unknown node {}", edge.id, endpoint));
                }
            }
        }

        let connected: HashSet<&str> = edges.iter().flat_map(|e| [e.source.as_str(), e.target.as_str()]).collect();
        let orphans: Vec<&str> = nodes.iter().filter(|n| !n.is(NodeType::Start) && !connected.contains(n.id.as_str())).map(Node::label).collect();
        if !orphans.is_empty() {
            let verb = if orphans.len() == 1 { "node is" } else { "nodes are" };
            warnings.push(format!("{} {} not connected to the flow: {}", orphans.len(), verb, orphans.join(", ")));
        }

        let adjacency = Adjacency::build(nodes, edges);
        if let Some((from, to)) = cycle::find_cycle(&adjacency) {
            debug!(from, to, "cycle detected");
            errors.push("flow contains infinite cycles".to_string());
        }

        let depth = depth::max_depth(&adjacency, start.map(|n| n.id.as_str()), self.config.depth_strategy);
        if depth > self.config.max_depth {
            errors.push(format!("flow depth of {} exceeds the maximum allowed depth of {}", depth, self.config.max_depth));
        }

        for node in nodes.iter() {
            match &node.data {
                NodeData::Approval(data) => {
                    if data.approvers.is_empty() {
                        errors.push(format!("approval node '{}' must have at least one approver", node.label()));
                    }
                    if data.min_approvals == 0 {
                        errors.push(format!("approval node '{}' must require at least one approval", node.label()));
                    }
                }
                NodeData::Concentrator(data) => {
                    if data.min_approvals == 0 {
                        errors.push(format!("concentrator node '{}' must require at least one approval", node.label()));
                    }
                    let incoming = edges.iter().filter(|e| e.target == node.id).count();
                    if !data.require_all && data.min_approvals as usize > incoming {
                        errors.push(format!(
                            "concentrator node '{}' requires {} approvals but has only {} incoming connection{}",
                            node.label(),
                            data.min_approvals,
                            incoming,
                            if incoming == 1 { "" } else { "s" }
                        ));
                    }
                }
                _ => {}
            }
        }

        let result = ValidationResult::new(errors, warnings);
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            depth,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "flow validated"
        );
        result
    }
}
