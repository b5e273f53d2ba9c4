pub(crate) mod adjacency;
pub mod consts;
pub mod edge;
mod graph;
pub mod node;

pub use edge::{Edge, EdgeId};
pub use graph::FlowGraph;
pub use node::{ApprovalData, ApproverType, ConcentratorData, Node, NodeData, NodeId, NodeType, StartEndData};
