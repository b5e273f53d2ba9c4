//! Read-only adjacency view of a flow, shared by validation and conversion.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::flow::{Edge, Node, NodeType};

/// Directed graph over node ids.
///
/// Every node id and every edge endpoint becomes a vertex, so edges pointing at
/// ids missing from the node list are still followed.
pub(crate) struct Adjacency<'a> {
    graph: DiGraph<&'a str, ()>,
    index: HashMap<&'a str, NodeIndex>,
    kinds: HashMap<&'a str, NodeType>,
}

impl<'a> Adjacency<'a> {
    pub(crate) fn build(
        nodes: &'a [Node],
        edges: &'a [Edge],
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        let ids = nodes.iter().map(|n| n.id.as_str()).chain(edges.iter().flat_map(|e| [e.source.as_str(), e.target.as_str()]));
        for id in ids {
            index.entry(id).or_insert_with(|| graph.add_node(id));
        }
        for edge in edges.iter() {
            graph.add_edge(index[edge.source.as_str()], index[edge.target.as_str()], ());
        }

        // first occurrence wins for duplicated ids
        let mut kinds = HashMap::new();
        for node in nodes.iter() {
            kinds.entry(node.id.as_str()).or_insert(node.kind());
        }

        Self { graph, index, kinds }
    }

    pub(crate) fn graph(&self) -> &DiGraph<&'a str, ()> {
        &self.graph
    }

    /// Type of a node, `None` for ids only known from edges.
    pub(crate) fn kind(
        &self,
        id: &str,
    ) -> Option<NodeType> {
        self.kinds.get(id).copied()
    }

    pub(crate) fn children(
        &self,
        id: &str,
    ) -> impl Iterator<Item = &'a str> + '_ {
        self.index.get(id).into_iter().flat_map(move |idx| self.graph.neighbors(*idx).map(move |n| self.graph[n]))
    }
}
