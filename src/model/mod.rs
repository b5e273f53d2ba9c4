mod edge;
mod flow;
mod node;
mod step;

pub use edge::EdgeModel;
pub use flow::FlowModel;
pub use node::{NodeModel, Position};
pub use step::{ApproverRule, StepApproverType, StepModel};
