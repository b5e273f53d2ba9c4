/// Longest allowed chain of approval/concentrator nodes after the start node.
pub const MAX_FLOW_DEPTH: usize = 5;

/// Edge type used by the visual editor for generated connections.
pub const DEFAULT_EDGE_TYPE: &str = "smoothstep";

/// Ids of the synthetic terminal nodes built from a step list.
pub const START_NODE_ID: &str = "start";
pub const END_NODE_ID: &str = "end";

pub const START_NODE_NAME: &str = "Start";
pub const END_NODE_NAME: &str = "End";

/// Canvas layout of a flow rebuilt from steps.
pub const START_X: f64 = 50.0;
pub const AXIS_Y: f64 = 200.0;
pub const NODE_SPACING: f64 = 250.0;
