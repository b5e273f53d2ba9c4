//! Directed connections between flow nodes.

use crate::{flow::node::NodeId, model::EdgeModel};

/// Unique identifier for an edge within a flow.
pub type EdgeId = String;

/// A directed `source -> target` connection.
///
/// The optional condition is carried for the editor and never evaluated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// Editor edge type, e.g. `smoothstep`.
    pub kind: String,
    pub animated: bool,
    pub condition: Option<serde_json::Value>,
}

impl Edge {
    /// Edge id derived from its endpoints, as used for generated connections.
    pub fn id_for(
        source: &str,
        target: &str,
    ) -> EdgeId {
        format!("e-{}-{}", source, target)
    }

    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::id_for(&source, &target),
            source,
            target,
            kind: crate::flow::consts::DEFAULT_EDGE_TYPE.to_string(),
            animated: true,
            condition: None,
        }
    }

    pub fn to_model(&self) -> EdgeModel {
        EdgeModel {
            id: self.id.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
            kind: self.kind.clone(),
            animated: self.animated,
            condition: self.condition.clone(),
        }
    }
}

impl From<&EdgeModel> for Edge {
    fn from(model: &EdgeModel) -> Self {
        Self {
            id: model.id.clone(),
            source: model.source.clone(),
            target: model.target.clone(),
            kind: model.kind.clone(),
            animated: model.animated,
            condition: model.condition.clone(),
        }
    }
}
