use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::{
    ApproflowError, Result,
    config::{ConvertConfig, UnreachedPolicy},
    flow::{ApprovalData, ApproverType, Edge, Node, NodeData, NodeType, adjacency::Adjacency},
    model::{ApproverRule, StepModel},
};

/// Hop count from `start` to every node it reaches.
fn bfs_levels<'a>(
    adjacency: &Adjacency<'a>,
    start: &'a str,
) -> HashMap<&'a str, u32> {
    let mut levels = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        let level = levels[id];
        for child in adjacency.children(id) {
            if !levels.contains_key(child) {
                levels.insert(child, level + 1);
                queue.push_back(child);
            }
        }
    }

    levels
}

fn to_step(
    data: &ApprovalData,
    step_order: u32,
) -> Result<StepModel> {
    let first = data.approvers.first().cloned();
    let rule = ApproverRule {
        kind: data.approver_type,
        approvers: data.approvers.clone(),
    };

    Ok(StepModel {
        step_order,
        name: data.name.clone(),
        description: data.description.clone(),
        approver_type: data.approver_type.into(),
        approver_role: if data.approver_type == ApproverType::Role { first.clone() } else { None },
        approver_id: first,
        approver_rule: Some(serde_json::to_value(rule)?),
        require_all: data.require_all,
        min_approvals: data.min_approvals,
        ..Default::default()
    })
}

/// Linearize a flow graph into an ordered step list.
///
/// Every approval node becomes one step whose `step_order` is its BFS level
/// from the first start node, so parallel approvals share an order. The list
/// is sorted by order, ties keep graph node order. Only the first approver is
/// stored in the flat `approver_id`; `approver_rule` carries all of them.
pub fn graph_to_steps(
    nodes: &[Node],
    edges: &[Edge],
    config: &ConvertConfig,
) -> Result<Vec<StepModel>> {
    let adjacency = Adjacency::build(nodes, edges);
    let levels = match nodes.iter().find(|n| n.is(NodeType::Start)) {
        Some(start) => bfs_levels(&adjacency, start.id.as_str()),
        None => HashMap::new(),
    };

    let approvals: Vec<(&Node, &ApprovalData)> = nodes
        .iter()
        .filter_map(|n| match &n.data {
            NodeData::Approval(data) => Some((n, data)),
            _ => None,
        })
        .collect();

    let unreached: Vec<&str> = approvals.iter().filter(|(n, _)| !levels.contains_key(n.id.as_str())).map(|(n, _)| n.label()).collect();
    if !unreached.is_empty() {
        match config.unreached {
            UnreachedPolicy::Reject => {
                return Err(ApproflowError::Convert(format!("approval nodes not reachable from the start node: {}", unreached.join(", "))));
            }
            UnreachedPolicy::Append => {
                warn!(nodes = %unreached.join(", "), "ordering unreachable approval nodes last");
            }
        }
    }

    let mut next = approvals.iter().filter_map(|(n, _)| levels.get(n.id.as_str()).copied()).max().unwrap_or(0);
    let mut steps = Vec::with_capacity(approvals.len());
    for (node, data) in approvals.iter() {
        let step_order = match levels.get(node.id.as_str()) {
            Some(level) => *level,
            None => {
                next += 1;
                next
            }
        };
        steps.push(to_step(data, step_order)?);
    }
    steps.sort_by_key(|s| s.step_order);

    debug!(steps = steps.len(), unreached = unreached.len(), "flow graph converted to steps");
    Ok(steps)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{
        ApprovalData, ApproflowError, ApproverType, ConcentratorData, ConvertConfig, Edge, Node, NodeData, Position, StepApproverType,
        UnreachedPolicy, graph_to_steps,
    };

    fn node(
        id: &str,
        data: NodeData,
    ) -> Node {
        Node::new(id, data, Position::default())
    }

    fn approval(
        id: &str,
        approver_type: ApproverType,
        approvers: &[&str],
    ) -> Node {
        node(
            id,
            NodeData::Approval(ApprovalData {
                name: id.to_string(),
                approver_type,
                approvers: approvers.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_linear_orders() {
        let nodes = vec![
            node("start", NodeData::start("Start")),
            approval("Manager", ApproverType::User, &["u-1", "u-2"]),
            approval("Finance", ApproverType::Role, &["finance"]),
            approval("Board", ApproverType::Group, &["g-1"]),
            node("end", NodeData::end("End")),
        ];
        let edges = vec![Edge::new("start", "Manager"), Edge::new("Manager", "Finance"), Edge::new("Finance", "Board"), Edge::new("Board", "end")];

        let steps = graph_to_steps(&nodes, &edges, &ConvertConfig::default()).unwrap();
        let orders: Vec<(u32, &str)> = steps.iter().map(|s| (s.step_order, s.name.as_str())).collect();
        assert_eq!(orders, vec![(1, "Manager"), (2, "Finance"), (3, "Board")]);

        assert_eq!(steps[0].approver_type, StepApproverType::User);
        assert_eq!(steps[0].approver_id.as_deref(), Some("u-1"));
        assert_eq!(steps[0].approver_role, None);
        assert_eq!(steps[0].approver_rule, Some(json!({ "type": "user", "approvers": ["u-1", "u-2"] })));

        assert_eq!(steps[1].approver_type, StepApproverType::Role);
        assert_eq!(steps[1].approver_id.as_deref(), Some("finance"));
        assert_eq!(steps[1].approver_role.as_deref(), Some("finance"));

        assert_eq!(steps[2].approver_type, StepApproverType::Dynamic);
        assert_eq!(steps[2].approver_rule, Some(json!({ "type": "group", "approvers": ["g-1"] })));
        assert_eq!(steps[2].min_approvals, 1);
        assert!(steps[2].id.is_none());
    }

    #[test]
    fn test_parallel_branches_share_order() {
        let nodes = vec![
            node("start", NodeData::start("Start")),
            approval("Legal", ApproverType::User, &["u-1"]),
            approval("Finance", ApproverType::User, &["u-2"]),
            node(
                "k",
                NodeData::Concentrator(ConcentratorData {
                    name: "Merge".to_string(),
                    require_all: true,
                    min_approvals: 2,
                }),
            ),
            approval("CEO", ApproverType::User, &["u-3"]),
            node("end", NodeData::end("End")),
        ];
        let edges = vec![
            Edge::new("start", "Legal"),
            Edge::new("start", "Finance"),
            Edge::new("Legal", "k"),
            Edge::new("Finance", "k"),
            Edge::new("k", "CEO"),
            Edge::new("CEO", "end"),
        ];

        let steps = graph_to_steps(&nodes, &edges, &ConvertConfig::default()).unwrap();
        let orders: Vec<(u32, &str)> = steps.iter().map(|s| (s.step_order, s.name.as_str())).collect();
        // the concentrator is not a step but still takes a level
        assert_eq!(orders, vec![(1, "Legal"), (1, "Finance"), (3, "CEO")]);
    }

    #[test]
    fn test_unreached_nodes_are_appended() {
        let nodes = vec![
            node("start", NodeData::start("Start")),
            approval("Detached", ApproverType::User, &["u-9"]),
            approval("Manager", ApproverType::User, &["u-1"]),
            approval("Finance", ApproverType::User, &["u-2"]),
            node("end", NodeData::end("End")),
        ];
        let edges = vec![Edge::new("start", "Manager"), Edge::new("Manager", "Finance"), Edge::new("Finance", "end")];

        let steps = graph_to_steps(&nodes, &edges, &ConvertConfig::default()).unwrap();
        let orders: Vec<(u32, &str)> = steps.iter().map(|s| (s.step_order, s.name.as_str())).collect();
        assert_eq!(orders, vec![(1, "Manager"), (2, "Finance"), (3, "Detached")]);
    }

    #[test]
    fn test_unreached_nodes_rejected() {
        let nodes = vec![node("start", NodeData::start("Start")), approval("Detached", ApproverType::User, &["u-9"])];
        let config = ConvertConfig {
            unreached: UnreachedPolicy::Reject,
        };

        let err = graph_to_steps(&nodes, &[], &config).unwrap_err();
        assert_eq!(err, ApproflowError::Convert("approval nodes not reachable from the start node: Detached".to_string()));
    }

    #[test]
    fn test_no_start_node() {
        let nodes = vec![approval("A", ApproverType::User, &["u-1"]), approval("B", ApproverType::User, &["u-2"])];
        let edges = vec![Edge::new("A", "B")];

        let steps = graph_to_steps(&nodes, &edges, &ConvertConfig::default()).unwrap();
        let orders: Vec<(u32, &str)> = steps.iter().map(|s| (s.step_order, s.name.as_str())).collect();
        assert_eq!(orders, vec![(1, "A"), (2, "B")]);
    }
}
