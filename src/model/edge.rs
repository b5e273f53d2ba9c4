use serde::{Deserialize, Serialize};

use crate::flow::consts::DEFAULT_EDGE_TYPE;

fn default_edge_type() -> String {
    DEFAULT_EDGE_TYPE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdgeModel {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default = "default_edge_type")]
    pub kind: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<serde_json::Value>,
}
