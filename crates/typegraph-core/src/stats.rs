//! Summary counts over a graph

use crate::edge::Relationship;
use crate::node::{TypeCategory, TypeKind};
use crate::store::GraphStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics for a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes_by_kind: BTreeMap<TypeKind, usize>,
    pub nodes_by_category: BTreeMap<TypeCategory, usize>,
    pub edges_by_relationship: BTreeMap<Relationship, usize>,
    /// Mean node complexity, 0 for an empty graph
    pub average_complexity: f64,
    /// Mean edge strength, 0 without edges
    pub average_strength: f64,
    /// `edges / (n * (n - 1))`, 0 below two nodes
    pub density: f64,
}

impl GraphStats {
    pub fn collect(store: &GraphStore) -> Self {
        let mut stats = Self {
            node_count: store.node_count(),
            edge_count: store.edge_count(),
            ..Self::default()
        };

        let mut complexity_total = 0u64;
        for node in store.nodes() {
            *stats.nodes_by_kind.entry(node.kind).or_default() += 1;
            *stats.nodes_by_category.entry(node.category).or_default() += 1;
            complexity_total += u64::from(node.complexity);
        }

        let mut strength_total = 0u64;
        for edge in store.edges() {
            *stats.edges_by_relationship.entry(edge.relationship).or_default() += 1;
            strength_total += u64::from(edge.strength);
        }

        if stats.node_count > 0 {
            stats.average_complexity = complexity_total as f64 / stats.node_count as f64;
        }
        if stats.edge_count > 0 {
            stats.average_strength = strength_total as f64 / stats.edge_count as f64;
        }
        if stats.node_count > 1 {
            let n = stats.node_count as f64;
            stats.density = stats.edge_count as f64 / (n * (n - 1.0));
        }

        stats
    }
}
