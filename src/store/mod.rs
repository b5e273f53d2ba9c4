//! Boundary to the external flow step API.
//!
//! The real backend is reached over HTTP by the host application; this crate
//! only needs "load the steps of a flow" and "replace the steps of a flow".
//! `MemStore` keeps steps in memory for tests and demos.

mod mem;

use std::error::Error;

use crate::{ApproflowError, Result, model::StepModel};

pub use mem::MemStore;

/// Maps backend errors to ApproflowError.
fn map_store_err(err: impl Error) -> ApproflowError {
    ApproflowError::Store(err.to_string())
}

/// Persistence of flow step lists.
pub trait StepStore: Send + Sync {
    /// Returns the stored steps of a flow, empty for an unknown flow.
    fn load_steps(
        &self,
        flow_id: &str,
    ) -> Result<Vec<StepModel>>;

    /// Replaces all steps of a flow.
    fn update_steps(
        &self,
        flow_id: &str,
        steps: &[StepModel],
    ) -> Result<()>;
}
