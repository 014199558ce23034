//! JSON export shape and import

use crate::error::ExportResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use typegraph_core::{EdgeId, Endpoint, Error, GraphMetadata, GraphStore, NodeId, TypeEdge, TypeNode};

/// Serialized graph: `{metadata, nodes, edges}`.
///
/// Every field defaults, so partial or hand-written documents still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphExport {
    pub metadata: GraphMetadata,
    pub nodes: Vec<TypeNode>,
    pub edges: Vec<TypeEdge>,
}

impl GraphExport {
    pub fn from_store(store: &GraphStore) -> Self {
        Self {
            metadata: store.metadata().clone(),
            nodes: store.nodes().cloned().collect(),
            edges: store.edges().cloned().collect(),
        }
    }

    /// Build a store holding exactly these values, unvalidated
    pub fn into_store(mut self) -> GraphStore {
        self.fill_missing_ids();
        GraphStore::from_parts(self.metadata, self.nodes, self.edges)
    }

    /// Give generated ids to nodes and edges imported without one
    fn fill_missing_ids(&mut self) {
        for node in self.nodes.iter_mut().filter(|n| n.id.as_str().is_empty()) {
            node.id = NodeId::generate();
        }
        for edge in self.edges.iter_mut().filter(|e| e.id.as_str().is_empty()) {
            edge.id = EdgeId::generate();
        }
    }
}

/// Counts reported by `merge_into`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Pretty-printed JSON export
pub fn to_json(store: &GraphStore) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(&GraphExport::from_store(store))?)
}

/// Parse a JSON export into a new store. No clamping and no referential checks.
pub fn from_json(json: &str) -> ExportResult<GraphStore> {
    let export: GraphExport = serde_json::from_str(json)?;
    tracing::debug!(
        "Parsed graph export '{}' with {} nodes and {} edges",
        export.metadata.name,
        export.nodes.len(),
        export.edges.len()
    );
    Ok(export.into_store())
}

/// Merge an export into an existing store through the validating add operations.
///
/// Nodes with an existing id are overwritten. Every edge endpoint must exist
/// either in `store` or among the imported nodes; otherwise nothing is merged.
pub fn merge_into(store: &mut GraphStore, mut export: GraphExport) -> ExportResult<MergeSummary> {
    export.fill_missing_ids();
    let incoming: BTreeSet<&NodeId> = export.nodes.iter().map(|n| &n.id).collect();
    let resolves = |id: &NodeId| store.contains_node(id.as_str()) || incoming.contains(id);

    for edge in &export.edges {
        if !resolves(&edge.source) {
            return Err(Error::MissingEndpoint {
                endpoint: Endpoint::Source,
                id: edge.source.to_string(),
            }
            .into());
        }
        if !resolves(&edge.target) {
            return Err(Error::MissingEndpoint {
                endpoint: Endpoint::Target,
                id: edge.target.to_string(),
            }
            .into());
        }
    }

    let summary = MergeSummary {
        nodes: export.nodes.len(),
        edges: export.edges.len(),
    };
    for node in export.nodes {
        store.add_node(node.into());
    }
    for edge in export.edges {
        store.add_edge(edge.into())?;
    }

    tracing::debug!("Merged {} nodes and {} edges", summary.nodes, summary.edges);
    Ok(summary)
}
