//! Cytoscape.js element list

use serde::Serialize;
use typegraph_core::{GraphStore, Relationship, TypeCategory, TypeEdge, TypeKind, TypeNode};

/// `{nodes: [{data}], edges: [{data}]}` without styling
#[derive(Debug, Serialize)]
pub struct CytoscapeGraph<'a> {
    pub nodes: Vec<Element<NodeData<'a>>>,
    pub edges: Vec<Element<EdgeData<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct Element<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct NodeData<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub kind: TypeKind,
    pub category: TypeCategory,
    pub complexity: u8,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EdgeData<'a> {
    pub id: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub label: Relationship,
    pub strength: u8,
}

impl<'a> From<&'a TypeNode> for NodeData<'a> {
    fn from(node: &'a TypeNode) -> Self {
        Self {
            id: node.id.as_str(),
            label: &node.name,
            kind: node.kind,
            category: node.category,
            complexity: node.complexity,
            description: &node.description,
        }
    }
}

impl<'a> From<&'a TypeEdge> for EdgeData<'a> {
    fn from(edge: &'a TypeEdge) -> Self {
        Self {
            id: edge.id.as_str(),
            source: edge.source.as_str(),
            target: edge.target.as_str(),
            label: edge.relationship,
            strength: edge.strength,
        }
    }
}

impl<'a> CytoscapeGraph<'a> {
    pub fn from_store(store: &'a GraphStore) -> Self {
        Self {
            nodes: store.nodes().map(|n| Element { data: n.into() }).collect(),
            edges: store.edges().map(|e| Element { data: e.into() }).collect(),
        }
    }
}

/// Pretty-printed Cytoscape.js JSON
pub fn to_cytoscape(store: &GraphStore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CytoscapeGraph::from_store(store))
}
