//! TypeGraph Export - Serialization formats for type-relationship graphs
//!
//! Renders a `GraphStore` as JSON, Graphviz DOT or a Cytoscape.js element
//! list, and rebuilds stores from the JSON shape.

pub mod cytoscape;
pub mod dot;
pub mod error;
pub mod format;
pub mod json;

pub use cytoscape::{to_cytoscape, CytoscapeGraph};
pub use dot::to_dot;
pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use json::{from_json, merge_into, to_json, GraphExport, MergeSummary};

use typegraph_core::GraphStore;

/// Export and import entry points on `GraphStore`
pub trait GraphIo: Sized {
    /// Serialize the whole graph in `format`
    fn export_graph(&self, format: ExportFormat) -> ExportResult<String>;

    /// Rebuild a graph from the JSON export shape
    fn from_json(json: &str) -> ExportResult<Self>;
}

impl GraphIo for GraphStore {
    fn export_graph(&self, format: ExportFormat) -> ExportResult<String> {
        let output = match format {
            ExportFormat::Json => to_json(self)?,
            ExportFormat::Dot => to_dot(self),
            ExportFormat::Cytoscape => to_cytoscape(self)?,
        };
        tracing::debug!("Exported {} nodes as {} ({} bytes)", self.node_count(), format, output.len());
        Ok(output)
    }

    fn from_json(json: &str) -> ExportResult<Self> {
        json::from_json(json)
    }
}
