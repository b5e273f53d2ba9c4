//! Longest chain of nodes after the start node.
//!
//! `depth(end) = 0`, `depth(start) = max(depth(child))` and any other node
//! counts `1 + max(depth(child))`. A node with no children contributes just
//! itself. Reaching a node already on the current path contributes 0, so the
//! walk terminates on cyclic input.

use std::collections::{HashMap, HashSet};

use crate::{config::DepthStrategy, flow::NodeType, flow::adjacency::Adjacency};

/// Max depth below `start`, or 0 when the flow has no start node.
pub(crate) fn max_depth(
    adjacency: &Adjacency<'_>,
    start: Option<&str>,
    strategy: DepthStrategy,
) -> usize {
    let Some(start) = start else {
        return 0;
    };

    match strategy {
        DepthStrategy::PathLocal => path_local(adjacency, start, &HashSet::new()),
        DepthStrategy::Memoized => memoized(adjacency, start, &mut HashSet::new(), &mut HashMap::new()),
    }
}

fn own_weight(kind: Option<NodeType>) -> usize {
    match kind {
        Some(NodeType::Start) => 0,
        _ => 1,
    }
}

// Every call copies the visited set, so re-converging branches are measured
// once per path. Exponential on stacked diamonds.
fn path_local<'a>(
    adjacency: &Adjacency<'a>,
    id: &'a str,
    visited: &HashSet<&'a str>,
) -> usize {
    if visited.contains(id) {
        return 0;
    }
    let kind = adjacency.kind(id);
    if kind == Some(NodeType::End) {
        return 0;
    }

    let mut visited = visited.clone();
    visited.insert(id);

    let deepest = adjacency.children(id).map(|child| path_local(adjacency, child, &visited)).max().unwrap_or(0);
    deepest + own_weight(kind)
}

// Identical to `path_local` on acyclic graphs. Cyclic graphs are already
// rejected before depth matters.
fn memoized<'a>(
    adjacency: &Adjacency<'a>,
    id: &'a str,
    on_path: &mut HashSet<&'a str>,
    memo: &mut HashMap<&'a str, usize>,
) -> usize {
    if let Some(depth) = memo.get(id) {
        return *depth;
    }
    if on_path.contains(id) {
        return 0;
    }
    let kind = adjacency.kind(id);
    if kind == Some(NodeType::End) {
        return 0;
    }

    on_path.insert(id);
    let children: Vec<&'a str> = adjacency.children(id).collect();
    let deepest = children.into_iter().map(|child| memoized(adjacency, child, on_path, memo)).max().unwrap_or(0);
    on_path.remove(id);

    let depth = deepest + own_weight(kind);
    memo.insert(id, depth);
    depth
}
