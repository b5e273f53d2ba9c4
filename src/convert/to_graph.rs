use std::collections::HashSet;

use tracing::debug;

use crate::{
    flow::{
        ApprovalData, ApproverType, Edge, FlowGraph, Node, NodeData,
        consts::{AXIS_Y, END_NODE_ID, END_NODE_NAME, NODE_SPACING, START_NODE_ID, START_NODE_NAME, START_X},
    },
    model::{Position, StepModel},
};

fn slot(index: usize) -> Position {
    Position::new(START_X + index as f64 * NODE_SPACING, AXIS_Y)
}

fn to_approval(step: &StepModel) -> ApprovalData {
    let (approver_type, approvers) = match step.rule() {
        Some(rule) if !rule.approvers.is_empty() => (rule.kind, rule.approvers),
        _ => {
            let kind = ApproverType::from(step.approver_type);
            let first = match kind {
                ApproverType::Role => step.approver_role.clone().or_else(|| step.approver_id.clone()),
                _ => step.approver_id.clone(),
            };
            (kind, first.into_iter().collect())
        }
    };

    ApprovalData {
        name: step.name.clone(),
        description: step.description.clone(),
        approver_type,
        approvers,
        require_all: step.require_all,
        min_approvals: step.min_approvals,
    }
}

/// Rebuild an editable graph from a stored step list.
///
/// Steps are sorted by `step_order` and laid out left to right as a single
/// chain `start -> step 1 -> ... -> step N -> end`. The end node is only added
/// when there is at least one step.
pub fn steps_to_graph(steps: &[StepModel]) -> FlowGraph {
    let mut sorted: Vec<&StepModel> = steps.iter().collect();
    sorted.sort_by_key(|s| s.step_order);

    let mut nodes = vec![Node::new(START_NODE_ID, NodeData::start(START_NODE_NAME), slot(0))];
    let mut edges = Vec::with_capacity(sorted.len() + 1);

    // step ids may repeat or clash with index-based ids
    let mut used: HashSet<String> = HashSet::new();
    let mut prev = START_NODE_ID.to_string();
    for (i, step) in sorted.iter().enumerate() {
        let mut id = match &step.id {
            Some(id) => format!("step-{}", id),
            None => format!("step-{}", i + 1),
        };
        while !used.insert(id.clone()) {
            id = format!("step-{}-{}", i + 1, nanoid::nanoid!(6));
        }
        nodes.push(Node::new(id.clone(), NodeData::Approval(to_approval(step)), slot(i + 1)));
        edges.push(Edge::new(prev, id.clone()));
        prev = id;
    }

    if !sorted.is_empty() {
        nodes.push(Node::new(END_NODE_ID, NodeData::end(END_NODE_NAME), slot(sorted.len() + 1)));
        edges.push(Edge::new(prev, END_NODE_ID));
    }

    debug!(steps = steps.len(), "flow graph rebuilt from steps");
    FlowGraph::from_parts(nodes, edges)
}
