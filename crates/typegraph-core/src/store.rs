//! In-memory graph store with referential integrity

use crate::analysis::{AnalysisOptions, GraphAnalysis, StructuralAnalyzer};
use crate::catalogue;
use crate::edge::{Direction, EdgeId, EdgeUpdate, NewTypeEdge, TypeEdge};
use crate::error::{Endpoint, Error, Result};
use crate::limits::clamp_strength;
use crate::metadata::GraphMetadata;
use crate::node::{NewTypeNode, NodeId, NodeUpdate, TypeNode};
use crate::path::{PathFinder, ShortestPath};
use crate::query::{NodeFilter, QueryEngine};
use crate::stats::GraphStats;
use std::collections::{BTreeMap, BTreeSet};

/// Owner of the node map, edge map and graph metadata.
///
/// Maps are ordered by id, so every iteration over the store (and every
/// algorithm built on it) is deterministic. Per-node adjacency indexes are
/// keyed by edge id and therefore keep parallel edges apart.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, TypeNode>,
    edges: BTreeMap<EdgeId, TypeEdge>,
    outgoing: BTreeMap<NodeId, BTreeSet<EdgeId>>,
    incoming: BTreeMap<NodeId, BTreeSet<EdgeId>>,
    metadata: GraphMetadata,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            metadata: GraphMetadata::new(name, description),
            ..Self::default()
        }
    }

    /// Create a graph pre-seeded with the built-in TypeScript concepts
    pub fn with_builtin_catalogue() -> Self {
        let mut store = Self::new(catalogue::CATALOGUE_NAME, catalogue::CATALOGUE_DESCRIPTION);
        catalogue::seed(&mut store);
        store.metadata.tags = catalogue::CATALOGUE_TAGS.iter().map(|t| t.to_string()).collect();
        store
    }

    /// Rebuild a store from raw parts without any validation.
    ///
    /// Edges whose endpoints are missing are kept as-is; callers that need
    /// the integrity invariant must check it themselves.
    pub fn from_parts(metadata: GraphMetadata, nodes: Vec<TypeNode>, edges: Vec<TypeEdge>) -> Self {
        let mut store = Self {
            metadata,
            ..Self::default()
        };
        for node in nodes {
            store.nodes.insert(node.id.clone(), node);
        }
        for edge in edges {
            if let Some(previous) = store.edges.insert(edge.id.clone(), edge.clone()) {
                store.unindex_edge(&previous);
            }
            store.index_edge(&edge);
        }
        store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Node Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a node, or overwrite the node with the same explicit id
    pub fn add_node(&mut self, mut data: NewTypeNode) -> TypeNode {
        let id = data.id.take().unwrap_or_else(NodeId::generate);
        let node = TypeNode::from_new(id.clone(), data);

        if self.nodes.insert(id.clone(), node.clone()).is_some() {
            tracing::debug!("Overwrote node {}", id);
        } else {
            tracing::debug!("Added node {} ({})", id, node.name);
        }
        self.metadata.touch();
        node
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.remove(id).is_none() {
            return false;
        }

        let incident: BTreeSet<EdgeId> = self
            .outgoing
            .remove(id)
            .into_iter()
            .chain(self.incoming.remove(id))
            .flatten()
            .collect();

        for edge_id in &incident {
            if let Some(edge) = self.edges.remove(edge_id) {
                self.unindex_edge(&edge);
            }
        }

        tracing::debug!("Removed node {} and {} incident edges", id, incident.len());
        self.metadata.touch();
        true
    }

    /// Merge fields into an existing node
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> Option<TypeNode> {
        let node = self.nodes.get_mut(id)?;
        node.apply(update);
        let updated = node.clone();
        tracing::debug!("Updated node {}", id);
        self.metadata.touch();
        Some(updated)
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&TypeNode> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct neighbors one hop away in the given direction, ordered by id
    pub fn connected_nodes(&self, id: &str, direction: Direction) -> Vec<&TypeNode> {
        let mut neighbors: BTreeMap<&NodeId, &TypeNode> = BTreeMap::new();

        for edge in self.edges_of(id, direction) {
            let neighbor = match direction {
                Direction::Out => Some(&edge.target),
                Direction::In => Some(&edge.source),
                Direction::Both => edge.other_end(id),
            };
            if let Some(node) = neighbor.and_then(|n| self.nodes.get(n)) {
                neighbors.insert(&node.id, node);
            }
        }

        neighbors.into_values().collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a directed edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, mut data: NewTypeEdge) -> Result<TypeEdge> {
        if !self.nodes.contains_key(&data.source) {
            tracing::warn!("Rejected edge: source {} does not exist", data.source);
            return Err(Error::MissingEndpoint {
                endpoint: Endpoint::Source,
                id: data.source.0,
            });
        }
        if !self.nodes.contains_key(&data.target) {
            tracing::warn!("Rejected edge: target {} does not exist", data.target);
            return Err(Error::MissingEndpoint {
                endpoint: Endpoint::Target,
                id: data.target.0,
            });
        }

        let id = data.id.take().unwrap_or_else(EdgeId::generate);
        let edge = TypeEdge {
            id: id.clone(),
            source: data.source,
            target: data.target,
            relationship: data.relationship,
            strength: clamp_strength(data.strength),
            description: data.description,
            examples: data.examples,
            metadata: data.metadata,
        };

        if let Some(previous) = self.edges.insert(id.clone(), edge.clone()) {
            self.unindex_edge(&previous);
        }
        self.index_edge(&edge);

        tracing::debug!(
            "Added edge {}: {} -[{}]-> {} (strength {})",
            id,
            edge.source,
            edge.relationship,
            edge.target,
            edge.strength
        );
        self.metadata.touch();
        Ok(edge)
    }

    /// Remove an edge by id
    pub fn remove_edge(&mut self, id: &str) -> bool {
        match self.edges.remove(id) {
            Some(edge) => {
                self.unindex_edge(&edge);
                tracing::debug!("Removed edge {}", id);
                self.metadata.touch();
                true
            }
            None => false,
        }
    }

    /// Merge fields into an existing edge
    pub fn update_edge(&mut self, id: &str, update: EdgeUpdate) -> Option<TypeEdge> {
        let edge = self.edges.get_mut(id)?;
        edge.apply(update);
        let updated = edge.clone();
        tracing::debug!("Updated edge {}", id);
        self.metadata.touch();
        Some(updated)
    }

    pub fn get_edge(&self, id: &str) -> Option<&TypeEdge> {
        self.edges.get(id)
    }

    /// All edges in ascending id order
    pub fn edges(&self) -> impl Iterator<Item = &TypeEdge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every edge with exactly this source and target
    pub fn edges_between(&self, source: &str, target: &str) -> Vec<&TypeEdge> {
        self.outgoing_edges(source)
            .filter(|e| e.target.as_str() == target)
            .collect()
    }

    /// Edges leaving `id`, in ascending edge id order
    pub fn outgoing_edges<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a TypeEdge> + 'a {
        self.indexed_edges(self.outgoing.get(id))
    }

    /// Edges arriving at `id`, in ascending edge id order
    pub fn incoming_edges<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a TypeEdge> + 'a {
        self.indexed_edges(self.incoming.get(id))
    }

    /// Edges incident to `id` in the given direction; a self-loop is listed once
    pub fn edges_of(&self, id: &str, direction: Direction) -> Vec<&TypeEdge> {
        match direction {
            Direction::Out => self.outgoing_edges(id).collect(),
            Direction::In => self.incoming_edges(id).collect(),
            Direction::Both => {
                let ids: BTreeSet<&EdgeId> = self
                    .outgoing
                    .get(id)
                    .into_iter()
                    .chain(self.incoming.get(id))
                    .flatten()
                    .collect();
                ids.into_iter().filter_map(|e| self.edges.get(e)).collect()
            }
        }
    }

    /// Number of edges arriving at `id`
    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming.get(id).map_or(0, BTreeSet::len)
    }

    /// Number of edges leaving `id`
    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing.get(id).map_or(0, BTreeSet::len)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Graph Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
        self.metadata.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
        self.metadata.touch();
    }

    /// Add a metadata tag; duplicates are ignored
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.metadata.tags.contains(&tag) {
            self.metadata.tags.push(tag);
            self.metadata.touch();
        }
    }

    /// Remove every node and edge, keeping the metadata
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.metadata.touch();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn query_nodes(&self, filter: &NodeFilter) -> Vec<&TypeNode> {
        QueryEngine::query_nodes(self, filter)
    }

    pub fn find_shortest_path(&self, source: &str, target: &str) -> Option<ShortestPath> {
        PathFinder::find_shortest_path(self, source, target)
    }

    pub fn analyze(&self) -> GraphAnalysis {
        StructuralAnalyzer::analyze(self, &AnalysisOptions::default())
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::collect(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Adjacency index
    // ─────────────────────────────────────────────────────────────────────────

    fn indexed_edges<'a>(
        &'a self,
        ids: Option<&'a BTreeSet<EdgeId>>,
    ) -> impl Iterator<Item = &'a TypeEdge> + 'a {
        ids.into_iter()
            .flatten()
            .filter_map(move |id| self.edges.get(id))
    }

    fn index_edge(&mut self, edge: &TypeEdge) {
        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.id.clone());
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.id.clone());
    }

    fn unindex_edge(&mut self, edge: &TypeEdge) {
        if let Some(ids) = self.outgoing.get_mut(&edge.source) {
            ids.remove(&edge.id);
            if ids.is_empty() {
                self.outgoing.remove(&edge.source);
            }
        }
        if let Some(ids) = self.incoming.get_mut(&edge.target) {
            ids.remove(&edge.id);
            if ids.is_empty() {
                self.incoming.remove(&edge.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Relationship;
    use crate::node::{TypeCategory, TypeKind};

    fn node(id: &str) -> NewTypeNode {
        NewTypeNode::new(id, TypeKind::Object, TypeCategory::UserDefined).with_id(id)
    }

    fn abc() -> GraphStore {
        let mut store = GraphStore::new("test", "");
        for id in ["A", "B", "C"] {
            store.add_node(node(id));
        }
        store
    }

    #[test]
    fn test_add_and_get_node() {
        let mut store = GraphStore::new("test", "");
        let added = store.add_node(
            NewTypeNode::new("Point", TypeKind::Interface, TypeCategory::UserDefined)
                .with_complexity(8),
        );

        assert!(added.id.as_str().starts_with("node_"));
        let stored = store.get_node(added.id.as_str()).unwrap();
        assert_eq!(stored.name, "Point");
        assert_eq!(stored.complexity, 5);
        assert!(store.get_node("missing").is_none());
    }

    #[test]
    fn test_add_node_with_existing_id_overwrites() {
        let mut store = abc();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();

        store.add_node(node("A").with_description("replaced"));

        assert_eq!(store.node_count(), 3);
        assert_eq!(store.get_node("A").unwrap().description, "replaced");
        assert_eq!(store.edges_between("A", "B").len(), 1);
    }

    #[test]
    fn test_add_edge_clamps_strength() {
        let mut store = abc();
        let strong = store
            .add_edge(NewTypeEdge::new("A", "B", Relationship::Uses).with_strength(50))
            .unwrap();
        let weak = store
            .add_edge(NewTypeEdge::new("A", "B", Relationship::Extends).with_strength(0))
            .unwrap();
        let default = store
            .add_edge(NewTypeEdge::new("B", "C", Relationship::Contains))
            .unwrap();

        assert_eq!(strong.strength, 10);
        assert_eq!(weak.strength, 1);
        assert_eq!(default.strength, 5);
    }

    #[test]
    fn test_add_edge_missing_endpoint_does_not_mutate() {
        let mut store = abc();
        let before = store.metadata().updated_at;

        let err = store
            .add_edge(NewTypeEdge::new("A", "Z", Relationship::Uses))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingEndpoint { endpoint: Endpoint::Target, ref id } if id == "Z"
        ));

        let err = store
            .add_edge(NewTypeEdge::new("Z", "A", Relationship::Uses))
            .unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { endpoint: Endpoint::Source, .. }));

        assert_eq!(store.edge_count(), 0);
        assert!(store.edges_of("A", Direction::Both).is_empty());
        assert_eq!(store.metadata().updated_at, before);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut store = abc();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Extends)).unwrap();
        store.add_edge(NewTypeEdge::new("B", "A", Relationship::Returns)).unwrap();

        assert_eq!(store.edges_between("A", "B").len(), 2);
        assert_eq!(store.edges_between("B", "A").len(), 1);
        assert!(store.edges_between("A", "C").is_empty());
        assert_eq!(store.out_degree("A"), 2);
        assert_eq!(store.in_degree("A"), 1);
    }

    #[test]
    fn test_remove_node_cascades_exactly_incident_edges() {
        let mut store = abc();
        store.add_node(node("D"));
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses).with_strength(9)).unwrap();
        store.add_edge(NewTypeEdge::new("B", "C", Relationship::Uses).with_strength(9)).unwrap();
        let survivor = store
            .add_edge(NewTypeEdge::new("C", "D", Relationship::Contains))
            .unwrap();

        assert!(store.remove_node("B"));
        assert!(!store.remove_node("B"));

        assert!(store.edges_between("A", "B").is_empty());
        assert!(store.edges_between("B", "C").is_empty());
        assert!(store.connected_nodes("A", Direction::Both).is_empty());
        assert_eq!(store.edge_count(), 1);
        assert!(store.get_edge(survivor.id.as_str()).is_some());
        let c_neighbors: Vec<&str> = store
            .connected_nodes("C", Direction::Both)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(c_neighbors, vec!["D"]);
    }

    #[test]
    fn test_connected_nodes_directions() {
        let mut store = abc();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Extends)).unwrap();
        store.add_edge(NewTypeEdge::new("C", "A", Relationship::Accepts)).unwrap();

        let ids = |nodes: Vec<&TypeNode>| -> Vec<String> {
            nodes.iter().map(|n| n.id.to_string()).collect()
        };

        assert_eq!(ids(store.connected_nodes("A", Direction::Out)), vec!["B"]);
        assert_eq!(ids(store.connected_nodes("A", Direction::In)), vec!["C"]);
        assert_eq!(ids(store.connected_nodes("A", Direction::Both)), vec!["B", "C"]);
        assert!(store.connected_nodes("missing", Direction::Both).is_empty());
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut store = abc();
        store.add_edge(NewTypeEdge::new("A", "A", Relationship::Transforms)).unwrap();

        assert_eq!(store.edges_of("A", Direction::Both).len(), 1);
        let neighbors = store.connected_nodes("A", Direction::Both);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].id.as_str(), "A");

        assert!(store.remove_node("A"));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_update_node_and_edge() {
        let mut store = abc();
        let edge = store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();

        let updated = store
            .update_node("A", NodeUpdate::new().name("Alpha").complexity(0))
            .unwrap();
        assert_eq!(updated.name, "Alpha");
        assert_eq!(updated.complexity, 1);
        assert!(store.update_node("missing", NodeUpdate::new()).is_none());

        let updated = store
            .update_edge(edge.id.as_str(), EdgeUpdate::new().strength(11))
            .unwrap();
        assert_eq!(updated.strength, 10);
        assert!(store.update_edge("missing", EdgeUpdate::new()).is_none());
    }

    #[test]
    fn test_remove_edge() {
        let mut store = abc();
        let edge = store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();

        assert!(store.remove_edge(edge.id.as_str()));
        assert!(!store.remove_edge(edge.id.as_str()));
        assert!(store.edges_between("A", "B").is_empty());
        assert_eq!(store.out_degree("A"), 0);
    }

    #[test]
    fn test_explicit_edge_id_overwrite_reindexes() {
        let mut store = abc();
        store
            .add_edge(NewTypeEdge::new("A", "B", Relationship::Uses).with_id("e1"))
            .unwrap();
        store
            .add_edge(NewTypeEdge::new("B", "C", Relationship::Uses).with_id("e1"))
            .unwrap();

        assert_eq!(store.edge_count(), 1);
        assert!(store.edges_between("A", "B").is_empty());
        assert_eq!(store.edges_between("B", "C").len(), 1);
    }

    #[test]
    fn test_mutations_refresh_updated_at() {
        let mut store = GraphStore::new("test", "");
        let created = store.metadata().updated_at;
        store.add_node(node("A"));
        assert!(store.metadata().updated_at >= created);
    }

    #[test]
    fn test_metadata_edits() {
        let mut store = GraphStore::new("first", "");
        store.set_name("second");
        store.set_description("desc");
        store.add_tag("ts");
        store.add_tag("ts");

        assert_eq!(store.metadata().name, "second");
        assert_eq!(store.metadata().description, "desc");
        assert_eq!(store.metadata().tags, vec!["ts".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut store = abc();
        store.add_edge(NewTypeEdge::new("A", "B", Relationship::Uses)).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.metadata().name, "test");
    }

    #[test]
    fn test_from_parts_keeps_dangling_edges() {
        let edge = TypeEdge {
            id: EdgeId::new("e"),
            source: NodeId::new("ghost"),
            target: NodeId::new("A"),
            ..TypeEdge::default()
        };
        let node = TypeNode {
            id: NodeId::new("A"),
            ..TypeNode::default()
        };
        let store = GraphStore::from_parts(GraphMetadata::default(), vec![node], vec![edge]);

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.in_degree("A"), 1);
        assert!(store.connected_nodes("A", Direction::In).is_empty());
    }
}
