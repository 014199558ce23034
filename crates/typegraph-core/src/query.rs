//! Node filtering and text search

use crate::node::{TypeCategory, TypeKind, TypeNode};
use crate::store::GraphStore;
use serde::{Deserialize, Serialize};

/// Node filter builder.
///
/// Every populated dimension must match; an empty dimension matches all nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeFilter {
    /// Allowed kinds (empty = all kinds)
    pub kinds: Vec<TypeKind>,

    /// Allowed categories (empty = all categories)
    pub categories: Vec<TypeCategory>,

    /// Inclusive `[min, max]` complexity range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_range: Option<(u8, u8)>,

    /// Case-insensitive substring matched against name, description,
    /// documentation and examples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,

    /// Maximum number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl NodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn with_category(mut self, category: TypeCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_complexity_range(mut self, min: u8, max: u8) -> Self {
        self.complexity_range = Some((min, max));
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only query engine over a store's nodes
pub struct QueryEngine;

impl QueryEngine {
    /// Nodes matching `filter`, in store order (ascending id)
    pub fn query_nodes<'a>(store: &'a GraphStore, filter: &NodeFilter) -> Vec<&'a TypeNode> {
        let search_lower = filter
            .search_term
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let matches = store
            .nodes()
            .filter(|node| Self::matches_filter(node, filter, search_lower.as_deref()));

        let results: Vec<&TypeNode> = match filter.limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        };

        tracing::debug!("Node query matched {} of {} nodes", results.len(), store.node_count());
        results
    }

    /// Check a single node against a filter
    pub fn matches(node: &TypeNode, filter: &NodeFilter) -> bool {
        let search_lower = filter
            .search_term
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Self::matches_filter(node, filter, search_lower.as_deref())
    }

    fn matches_filter(node: &TypeNode, filter: &NodeFilter, search_lower: Option<&str>) -> bool {
        if !filter.kinds.is_empty() && !filter.kinds.contains(&node.kind) {
            return false;
        }

        if !filter.categories.is_empty() && !filter.categories.contains(&node.category) {
            return false;
        }

        if let Some((min, max)) = filter.complexity_range {
            if node.complexity < min || node.complexity > max {
                return false;
            }
        }

        if let Some(term) = search_lower {
            let hit = node
                .searchable_fields()
                .any(|field| field.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        true
    }
}
