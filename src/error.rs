// SPDX-License-Identifier: MIT

//! Typed error handling for obi-graph
//!
//! Malformed documents are never errors: they degrade to the sequential
//! strategy. What remains is I/O around the engine and internal
//! consistency failures inside it.

use thiserror::Error;

use crate::obi::types::Edge;

/// Top-level error type for obi-graph
#[derive(Debug, Error)]
pub enum ObiError {
    /// A strategy produced an inconsistent graph
    #[error("Graph error: {0}")]
    Graph(#[from] GraphConsistencyError),

    /// Dialog file has an extension the loader does not read
    #[error("Unsupported dialog format: {0}")]
    UnsupportedFormat(String),

    /// No dialog with this id in the dialog directory
    #[error("Dialog '{0}' not found")]
    DialogNotFound(String),

    /// Configuration errors (invalid env vars or flags)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(String),
}

/// Internal-consistency violations raised while assembling a graph
///
/// These indicate a defect in a strategy or middleware, never bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphConsistencyError {
    /// An edge references a node id that is not in the node set
    #[error("Dangling edge {from} -> {to}: no node with id '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },
}

impl GraphConsistencyError {
    pub fn dangling(edge: &Edge, missing: &str) -> Self {
        Self::DanglingEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            missing: missing.to_string(),
        }
    }
}

impl ObiError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for ObiError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for ObiError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
