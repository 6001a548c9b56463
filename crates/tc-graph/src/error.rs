//! Graph-subsystem error type.

use thiserror::Error;

use tc_core::{Classify, NodeId, Severity};

/// Errors produced by `tc-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

impl Classify for GraphError {
    fn severity(&self) -> Severity {
        match self {
            GraphError::NodeNotFound(_) => Severity::Invariant,
            GraphError::Io(_) => Severity::Fatal,
            #[cfg(feature = "osm")]
            GraphError::Osm(_) => Severity::Input,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
