//! Conversion between the visual flow graph and the flat step list.
//!
//! The stored step model is an ordered list with no branches, so the graph is
//! a strict superset of what can be stored. Parallel branches collapse into
//! shared step orders and concentrator nodes are dropped; rebuilding a graph
//! from steps always yields a linear chain.

mod to_graph;
mod to_steps;

pub use to_graph::steps_to_graph;
pub use to_steps::graph_to_steps;
