use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ApproflowError, Result, flow::consts::MAX_FLOW_DEPTH};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// validation limits
    pub validation: ValidationConfig,
    /// graph to step conversion policy
    pub convert: ConvertConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// longest allowed chain of nodes after the start node, defaults to 5
    pub max_depth: usize,
    /// how the longest chain is measured
    pub depth_strategy: DepthStrategy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_FLOW_DEPTH,
            depth_strategy: DepthStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepthStrategy {
    /// one depth per node, reused by every path through it
    #[default]
    Memoized,
    /// every path re-walks its subtree with its own visited set
    PathLocal,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConvertConfig {
    /// what to do with approval nodes the start node cannot reach
    pub unreached: UnreachedPolicy,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnreachedPolicy {
    /// order them after the deepest reached step
    #[default]
    Append,
    /// fail the conversion
    Reject,
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| ApproflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}
