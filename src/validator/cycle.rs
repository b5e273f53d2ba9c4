//! Cycle detection over the flow's edges.

use petgraph::visit::{Control, DfsEvent, depth_first_search};

use crate::flow::adjacency::Adjacency;

/// Find an edge closing a cycle, if any.
///
/// Runs a colouring DFS from every vertex not yet visited, so disconnected
/// components are covered. An edge into a vertex that is still on the DFS path
/// (a back edge) closes a cycle; self-loops count.
pub(crate) fn find_cycle<'a>(adjacency: &Adjacency<'a>) -> Option<(&'a str, &'a str)> {
    let graph = adjacency.graph();
    let found = depth_first_search(graph, graph.node_indices(), |event| match event {
        DfsEvent::BackEdge(from, to) => Control::Break((from, to)),
        _ => Control::Continue,
    });

    found.break_value().map(|(from, to)| (graph[from], graph[to]))
}

#[cfg(test)]
mod test {
    use crate::{
        Edge, Node, NodeData, Position,
        flow::adjacency::Adjacency,
    };

    use super::find_cycle;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, NodeData::end(*id), Position::default())).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    #[test]
    fn test_acyclic_diamond() {
        let nodes = nodes(&["s", "a", "b", "k"]);
        let edges = edges(&[("s", "a"), ("s", "b"), ("a", "k"), ("b", "k")]);
        assert_eq!(find_cycle(&Adjacency::build(&nodes, &edges)), None);
    }

    #[test]
    fn test_two_node_cycle() {
        let nodes = nodes(&["s", "a", "b"]);
        let edges = edges(&[("s", "a"), ("a", "b"), ("b", "a")]);
        let (from, to) = find_cycle(&Adjacency::build(&nodes, &edges)).unwrap();
        assert!(matches!((from, to), ("b", "a") | ("a", "b")));
    }

    #[test]
    fn test_self_loop() {
        let nodes = nodes(&["a"]);
        let edges = edges(&[("a", "a")]);
        assert_eq!(find_cycle(&Adjacency::build(&nodes, &edges)), Some(("a", "a")));
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let nodes = nodes(&["s", "a", "x", "y", "z"]);
        let edges = edges(&[("s", "a"), ("x", "y"), ("y", "z"), ("z", "x")]);
        assert!(find_cycle(&Adjacency::build(&nodes, &edges)).is_some());
    }

    #[test]
    fn test_cycle_through_unknown_ids() {
        let nodes = nodes(&["a"]);
        let edges = edges(&[("a", "ghost"), ("ghost", "a")]);
        assert!(find_cycle(&Adjacency::build(&nodes, &edges)).is_some());
    }
}
