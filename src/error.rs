//! Error types for Approflow.
//!
//! All errors in Approflow are represented by the `ApproflowError` enum.
//! Validation problems are not errors: they are reported through
//! [`ValidationResult`] and only become an error when a save is refused.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validator::ValidationResult;

/// Unified error type for all Approflow operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum ApproflowError {
    /// Configuration parsing errors.
    #[error("{0}")]
    Config(String),

    /// Graph/step conversion and JSON decoding errors.
    #[error("{0}")]
    Convert(String),

    /// Structural graph mutation errors.
    #[error("{0}")]
    Graph(String),

    /// Node definition errors.
    #[error("{0}")]
    Node(String),

    /// Edge definition errors.
    #[error("{0}")]
    Edge(String),

    /// Step store errors.
    #[error("{0}")]
    Store(String),

    /// The flow failed validation and was not saved.
    #[error("flow is invalid: {}", .0.errors.join("; "))]
    Validation(ValidationResult),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<ApproflowError> for String {
    fn from(val: ApproflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for ApproflowError {
    fn from(error: std::io::Error) -> Self {
        ApproflowError::IoError(error.to_string())
    }
}

impl From<ApproflowError> for std::io::Error {
    fn from(val: ApproflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for ApproflowError {
    fn from(error: serde_json::Error) -> Self {
        ApproflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for ApproflowError {
    fn from(error: toml::de::Error) -> Self {
        ApproflowError::Config(error.to_string())
    }
}
