//! Typed flow nodes.
//!
//! A node's `type` on the wire selects the shape of its `data` payload, so the
//! two are modelled together as the [`NodeData`] sum type.

use std::str::FromStr;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;

use crate::{
    ApproflowError, Result,
    model::{NodeModel, Position},
};

/// node id
pub type NodeId = String;

/// Kind of a flow node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    Start,
    Approval,
    Concentrator,
    End,
}

/// Identity kind an approval node resolves its approvers against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApproverType {
    #[default]
    User,
    Role,
    Group,
}

fn default_min_approvals() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StartEndData {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub approver_type: ApproverType,
    /// approver ids, in assignment order
    #[serde(default)]
    pub approvers: Vec<String>,
    #[serde(default)]
    pub require_all: bool,
    #[serde(default = "default_min_approvals")]
    pub min_approvals: u32,
}

impl Default for ApprovalData {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            approver_type: ApproverType::default(),
            approvers: Vec::new(),
            require_all: false,
            min_approvals: default_min_approvals(),
        }
    }
}

/// Merge point of parallel approval branches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcentratorData {
    pub name: String,
    #[serde(default)]
    pub require_all: bool,
    #[serde(default = "default_min_approvals")]
    pub min_approvals: u32,
}

impl Default for ConcentratorData {
    fn default() -> Self {
        Self {
            name: String::new(),
            require_all: false,
            min_approvals: default_min_approvals(),
        }
    }
}

/// Node payload, tagged by node type.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Start(StartEndData),
    Approval(ApprovalData),
    Concentrator(ConcentratorData),
    End(StartEndData),
}

impl NodeData {
    pub fn start(name: impl Into<String>) -> Self {
        NodeData::Start(StartEndData { name: name.into() })
    }

    pub fn end(name: impl Into<String>) -> Self {
        NodeData::End(StartEndData { name: name.into() })
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Start(_) => NodeType::Start,
            NodeData::Approval(_) => NodeType::Approval,
            NodeData::Concentrator(_) => NodeType::Concentrator,
            NodeData::End(_) => NodeType::End,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeData::Start(d) | NodeData::End(d) => &d.name,
            NodeData::Approval(d) => &d.name,
            NodeData::Concentrator(d) => &d.name,
        }
    }

    fn to_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            NodeData::Start(d) | NodeData::End(d) => serde_json::to_value(d)?,
            NodeData::Approval(d) => serde_json::to_value(d)?,
            NodeData::Concentrator(d) => serde_json::to_value(d)?,
        };
        Ok(value)
    }
}

/// A vertex of the approval flow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// node id
    pub id: NodeId,
    /// canvas position
    pub position: Position,
    /// typed payload
    pub data: NodeData,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        data: NodeData,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }

    pub fn kind(&self) -> NodeType {
        self.data.node_type()
    }

    pub fn name(&self) -> &str {
        self.data.name()
    }

    /// Name for user-facing messages, falling back to the id for unnamed nodes.
    pub fn label(&self) -> &str {
        if self.name().is_empty() { self.id.as_str() } else { self.name() }
    }

    pub fn is(
        &self,
        kind: NodeType,
    ) -> bool {
        self.kind() == kind
    }

    pub fn to_model(&self) -> Result<NodeModel> {
        Ok(NodeModel {
            id: self.id.clone(),
            kind: self.kind().as_ref().to_string(),
            position: self.position,
            data: self.data.to_value()?,
        })
    }
}

fn parse_data<T: DeserializeOwned>(model: &NodeModel) -> Result<T> {
    let data = if model.data.is_null() { json!({}) } else { model.data.clone() };
    serde_json::from_value(data).map_err(|e| ApproflowError::Node(format!("invalid data for node {}: {}", model.id, e)))
}

impl TryFrom<&NodeModel> for Node {
    type Error = ApproflowError;

    fn try_from(model: &NodeModel) -> Result<Self> {
        let kind = NodeType::from_str(&model.kind).map_err(|_| ApproflowError::Node(format!("node {} has invalid type '{}'", model.id, model.kind)))?;

        let data = match kind {
            NodeType::Start => NodeData::Start(parse_data(model)?),
            NodeType::Approval => NodeData::Approval(parse_data(model)?),
            NodeType::Concentrator => NodeData::Concentrator(parse_data(model)?),
            NodeType::End => NodeData::End(parse_data(model)?),
        };

        Ok(Self {
            id: model.id.clone(),
            position: model.position,
            data,
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{ApprovalData, ApproflowError, ApproverType, Node, NodeData, NodeModel, NodeType, Position};

    fn model(
        kind: &str,
        data: serde_json::Value,
    ) -> NodeModel {
        NodeModel {
            id: "n1".to_string(),
            kind: kind.to_string(),
            position: Position::new(10.0, 20.0),
            data,
        }
    }

    #[test]
    fn test_parse_approval_node() {
        let node = Node::try_from(&model(
            "approval",
            json!({ "name": "Manager", "approverType": "role", "approvers": ["r-1", "r-2"], "requireAll": true, "minApprovals": 2 }),
        ))
        .unwrap();

        assert_eq!(node.kind(), NodeType::Approval);
        assert_eq!(node.position, Position::new(10.0, 20.0));
        let NodeData::Approval(data) = &node.data else {
            panic!("expected approval data");
        };
        assert_eq!(data.approver_type, ApproverType::Role);
        assert_eq!(data.approvers, vec!["r-1", "r-2"]);
        assert!(data.require_all);
        assert_eq!(data.min_approvals, 2);
        assert_eq!(data.description, None);
    }

    #[test]
    fn test_parse_defaults() {
        let node = Node::try_from(&model("concentrator", json!({ "name": "Merge" }))).unwrap();
        let NodeData::Concentrator(data) = &node.data else {
            panic!("expected concentrator data");
        };
        assert!(!data.require_all);
        assert_eq!(data.min_approvals, 1);

        let start = Node::try_from(&model("start", serde_json::Value::Null)).unwrap();
        assert_eq!(start.kind(), NodeType::Start);
        assert_eq!(start.name(), "");
        assert_eq!(start.label(), "n1");
    }

    #[test]
    fn test_parse_invalid_node() {
        let err = Node::try_from(&model("decision", json!({}))).unwrap_err();
        assert_eq!(err, ApproflowError::Node("node n1 has invalid type 'decision'".to_string()));

        let err = Node::try_from(&model("approval", json!({ "approvers": "u-1" }))).unwrap_err();
        assert!(matches!(err, ApproflowError::Node(_)));
    }

    #[test]
    fn test_node_to_model() {
        let node = Node::new(
            "a1",
            NodeData::Approval(ApprovalData {
                name: "Manager".to_string(),
                approvers: vec!["u-1".to_string()],
                ..Default::default()
            }),
            Position::new(300.0, 200.0),
        );
        let model = node.to_model().unwrap();
        assert_eq!(model.kind, "approval");
        assert_eq!(
            model.data,
            json!({ "name": "Manager", "approverType": "user", "approvers": ["u-1"], "requireAll": false, "minApprovals": 1 })
        );
        assert_eq!(Node::try_from(&model).unwrap(), node);
    }
}
