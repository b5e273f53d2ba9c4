//! Owned, mutable approval flow graph.
//!
//! The editing session owns a `FlowGraph` exclusively and mutates it as the
//! user adds, moves, connects and edits nodes. Validation and conversion borrow
//! it immutably and never change it.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    ApproflowError, Result,
    config::ConvertConfig,
    convert,
    flow::{
        edge::{Edge, EdgeId},
        node::{Node, NodeData, NodeId, NodeType},
    },
    model::{FlowModel, Position, StepModel},
    validator::{ValidationResult, Validator},
};

/// Node and edge lists of an approval flow, in editor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl FlowGraph {
    /// create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from already typed parts, without further checks.
    pub fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// get mutable node by id
    pub fn node_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// get edge by id
    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// first start node, which anchors depth and ordering
    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is(NodeType::Start))
    }

    /// number of edges pointing at a node
    pub fn incoming_count(
        &self,
        id: &str,
    ) -> usize {
        self.edges.iter().filter(|e| e.target == id).count()
    }

    /// Add a node with a generated id and return the id.
    pub fn add_node(
        &mut self,
        data: NodeData,
        position: Position,
    ) -> NodeId {
        let id = format!("{}-{}", data.node_type().as_ref(), nanoid::nanoid!(8));
        trace!(node = %id, kind = ?data.node_type(), "add node");
        self.nodes.push(Node::new(id.clone(), data, position));
        id
    }

    /// Insert a node with a caller-chosen id.
    pub fn insert_node(
        &mut self,
        node: Node,
    ) -> Result<()> {
        if self.node(&node.id).is_some() {
            return Err(ApproflowError::Graph(format!("node {} already exists", node.id)));
        }
        trace!(node = %node.id, kind = ?node.kind(), "insert node");
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id).ok_or(ApproflowError::Graph(format!("node {} not found", id)))?;
        let node = self.nodes.remove(idx);
        let before = self.edges.len();
        self.edges.retain(|e| e.source != id && e.target != id);
        trace!(node = %id, dropped_edges = before - self.edges.len(), "remove node");
        Ok(node)
    }

    pub fn move_node(
        &mut self,
        id: &str,
        position: Position,
    ) -> Result<()> {
        let node = self.node_mut(id).ok_or(ApproflowError::Graph(format!("node {} not found", id)))?;
        node.position = position;
        Ok(())
    }

    /// Replace a node's payload. The node type cannot change.
    pub fn update_node_data(
        &mut self,
        id: &str,
        data: NodeData,
    ) -> Result<()> {
        let node = self.node_mut(id).ok_or(ApproflowError::Graph(format!("node {} not found", id)))?;
        if node.kind() != data.node_type() {
            return Err(ApproflowError::Node(format!(
                "cannot change node {} from {} to {}",
                id,
                node.kind().as_ref(),
                data.node_type().as_ref()
            )));
        }
        trace!(node = %id, "update node data");
        node.data = data;
        Ok(())
    }

    /// Connect two existing nodes and return the new edge id.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<EdgeId> {
        if self.node(source).is_none() {
            return Err(ApproflowError::Edge(format!("source node {} not found", source)));
        }
        if self.node(target).is_none() {
            return Err(ApproflowError::Edge(format!("target node {} not found", target)));
        }
        if self.edges.iter().any(|e| e.source == source && e.target == target) {
            return Err(ApproflowError::Edge(format!("{} is already connected to {}", source, target)));
        }

        let mut edge = Edge::new(source, target);
        // derived ids are ambiguous when node ids contain '-'
        while self.edge(&edge.id).is_some() {
            edge.id = format!("{}-{}", Edge::id_for(source, target), nanoid::nanoid!(6));
        }
        let id = edge.id.clone();
        trace!(edge = %id, "connect");
        self.edges.push(edge);
        Ok(id)
    }

    pub fn disconnect(
        &mut self,
        id: &str,
    ) -> Result<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id).ok_or(ApproflowError::Edge(format!("edge {} not found", id)))?;
        trace!(edge = %id, "disconnect");
        Ok(self.edges.remove(idx))
    }

    pub fn validate(
        &self,
        validator: &Validator,
    ) -> ValidationResult {
        validator.validate(&self.nodes, &self.edges)
    }

    /// Linearize into the ordered step list stored by the flow API.
    pub fn to_steps(
        &self,
        config: &ConvertConfig,
    ) -> Result<Vec<StepModel>> {
        convert::graph_to_steps(&self.nodes, &self.edges, config)
    }

    pub fn to_model(&self) -> Result<FlowModel> {
        Ok(FlowModel {
            nodes: self.nodes.iter().map(Node::to_model).collect::<Result<Vec<_>>>()?,
            edges: self.edges.iter().map(Edge::to_model).collect(),
        })
    }

    /// Output a human-readable representation of the flow graph
    pub fn schema(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Approval Flow ===".to_string());
        lines.push(format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len()));
        lines.push(String::new());

        lines.push("--- Nodes ---".to_string());
        for node in self.nodes.iter() {
            lines.push(format!("[{}] {} (type: {})", node.id, node.name(), node.kind().as_ref()));
        }
        lines.push(String::new());

        lines.push("--- Graph Structure ---".to_string());
        for node in self.nodes.iter() {
            let outgoing: Vec<&str> = self.edges.iter().filter(|e| e.source == node.id).map(|e| e.target.as_str()).collect();
            if outgoing.is_empty() {
                lines.push(format!("{} -> (none)", node.id));
            } else {
                lines.push(format!("{} -> {}", node.id, outgoing.join(", ")));
            }
        }

        lines.join("\n")
    }
}

impl TryFrom<&FlowModel> for FlowGraph {
    type Error = ApproflowError;

    fn try_from(model: &FlowModel) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut nodes = Vec::with_capacity(model.nodes.len());
        for node_model in model.nodes.iter() {
            let node = Node::try_from(node_model)?;
            if !ids.insert(node.id.clone()) {
                return Err(ApproflowError::Node(format!("duplicate node id {}", node.id)));
            }
            nodes.push(node);
        }

        let mut edges = Vec::with_capacity(model.edges.len());
        for edge_model in model.edges.iter() {
            if !ids.contains(&edge_model.source) {
                return Err(ApproflowError::Edge(format!("source node {} not found", edge_model.source)));
            }
            if !ids.contains(&edge_model.target) {
                return Err(ApproflowError::Edge(format!("target node {} not found", edge_model.target)));
            }
            edges.push(Edge::from(edge_model));
        }

        debug!(nodes = nodes.len(), edges = edges.len(), "flow graph loaded");
        Ok(Self { nodes, edges })
    }
}
