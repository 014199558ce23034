//! Error types for TypeGraph Core

use thiserror::Error;

/// Result type alias using TypeGraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of an edge failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// TypeGraph error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing endpoint: {endpoint} node '{id}' does not exist")]
    MissingEndpoint { endpoint: Endpoint, id: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
