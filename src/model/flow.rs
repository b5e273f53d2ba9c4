use serde::{Deserialize, Serialize};

use crate::{
    ApproflowError, Result,
    model::{EdgeModel, NodeModel},
};

/// Node/edge lists as exchanged with the visual editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowModel {
    #[serde(default)]
    pub nodes: Vec<NodeModel>,
    #[serde(default)]
    pub edges: Vec<EdgeModel>,
}

impl FlowModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let flow = serde_json::from_str::<FlowModel>(s);
        match flow {
            Ok(v) => Ok(v),
            Err(e) => Err(ApproflowError::Convert(format!("invalid flow json: {}", e))),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
