//! Editing session of a single approval flow.
//!
//! The session rebuilds the graph from the stored steps when it opens, lets the
//! caller mutate it, and saves it all-or-nothing: an invalid flow is never
//! written. Dropping the session discards unsaved changes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    ApproflowError, Result,
    config::{Config, ConvertConfig},
    convert,
    flow::FlowGraph,
    store::StepStore,
    validator::{ValidationResult, Validator},
};

pub struct FlowEditor {
    flow_id: String,
    store: Arc<dyn StepStore>,
    graph: FlowGraph,
    validator: Validator,
    convert: ConvertConfig,
}

impl FlowEditor {
    /// Open a flow, building its graph from the stored steps.
    pub fn open(
        store: Arc<dyn StepStore>,
        flow_id: impl Into<String>,
        config: &Config,
    ) -> Result<Self> {
        let flow_id = flow_id.into();
        let steps = store.load_steps(&flow_id)?;
        let graph = convert::steps_to_graph(&steps);
        debug!(flow_id = %flow_id, steps = steps.len(), "flow opened");

        Ok(Self {
            flow_id,
            store,
            graph,
            validator: Validator::new(config.validation.clone()),
            convert: config.convert.clone(),
        })
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut FlowGraph {
        &mut self.graph
    }

    /// Replace the whole graph, e.g. with one decoded from the editor's JSON.
    pub fn replace_graph(
        &mut self,
        graph: FlowGraph,
    ) {
        self.graph = graph;
    }

    pub fn validate(&self) -> ValidationResult {
        self.graph.validate(&self.validator)
    }

    /// Validate, convert and store the flow.
    ///
    /// Returns the validation result (with any warnings) on success. An
    /// invalid flow yields [`ApproflowError::Validation`] and nothing is stored.
    pub fn save(&self) -> Result<ValidationResult> {
        let result = self.validate();
        if !result.valid {
            warn!(flow_id = %self.flow_id, errors = ?result.errors, "flow save rejected");
            return Err(ApproflowError::Validation(result));
        }

        let steps = self
            .graph
            .to_steps(&self.convert)?
            .into_iter()
            .map(|mut step| {
                step.flow_id = Some(self.flow_id.clone());
                step
            })
            .collect::<Vec<_>>();

        self.store.update_steps(&self.flow_id, &steps)?;
        debug!(flow_id = %self.flow_id, steps = steps.len(), warnings = result.warnings.len(), "flow saved");
        Ok(result)
    }
}
