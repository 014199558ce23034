//! Error types for TypeGraph export and import

use thiserror::Error;

/// Result type alias using ExportError
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Export/import error types
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported export format: {0} (expected json, dot or cytoscape)")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] typegraph_core::Error),
}
