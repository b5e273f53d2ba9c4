//! # Approflow
//!
//! Approflow holds the graph model behind a visual approval-flow editor. A
//! flow is drawn as typed nodes (`start`, `approval`, `concentrator`, `end`)
//! joined by directed edges. Before it is saved, the flow is validated and
//! then linearized into the ordered step list the approval API stores.
//!
//! ## Core Features
//!
//! - **Validation**: presence of start/end/approval nodes, orphan warnings,
//!   cycle rejection, depth limit, approver and concentrator checks
//! - **Conversion**: graph to ordered steps and steps back to an editable chain
//! - **Editing session**: open, mutate and save a flow all-or-nothing against a
//!   pluggable step store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use approflow::{Config, FlowEditor, MemStore};
//!
//! let store = Arc::new(MemStore::new());
//! let mut editor = FlowEditor::open(store, "flow-1", &Config::default())?;
//! // ... edit editor.graph_mut() ...
//! let result = editor.save()?;
//! ```

mod config;
mod convert;
mod editor;
mod error;
mod flow;
mod model;
mod store;
mod validator;

use std::sync::{Arc, RwLock};

pub use config::{Config, ConvertConfig, DepthStrategy, UnreachedPolicy, ValidationConfig};
pub use convert::{graph_to_steps, steps_to_graph};
pub use editor::FlowEditor;
pub use error::ApproflowError;
pub use flow::{
    ApprovalData, ApproverType, ConcentratorData, Edge, EdgeId, FlowGraph, Node, NodeData, NodeId, NodeType, StartEndData,
    consts,
};
pub use model::*;
pub use store::{MemStore, StepStore};
pub use validator::{ValidationResult, Validator, validate};

/// Result type alias for Approflow operations.
pub type Result<T> = std::result::Result<T, ApproflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
