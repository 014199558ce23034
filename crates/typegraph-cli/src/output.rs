//! Output formatting utilities

use serde::Serialize;
use typegraph_core::{TypeEdge, TypeNode};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `data` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// One-line node summary: `id  name [kind, category, complexity]`
pub fn node_line(node: &TypeNode) -> String {
    format!(
        "{}  {} [{}, {}, complexity {}]",
        node.id, node.name, node.kind, node.category, node.complexity
    )
}

/// One-line edge summary: `id: source -[relationship/strength]-> target`
pub fn edge_line(edge: &TypeEdge) -> String {
    format!(
        "{}: {} -[{}/{}]-> {}",
        edge.id, edge.source, edge.relationship, edge.strength, edge.target
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegraph_core::{NodeId, Relationship};

    #[test]
    fn test_edge_line() {
        let edge = TypeEdge {
            id: "e1".into(),
            source: NodeId::new("a"),
            target: NodeId::new("b"),
            relationship: Relationship::Extends,
            strength: 8,
            ..TypeEdge::default()
        };
        assert_eq!(edge_line(&edge), "e1: a -[extends/8]-> b");
    }

    #[test]
    fn test_node_line() {
        let node = TypeNode {
            id: NodeId::new("string"),
            name: "string".to_string(),
            ..TypeNode::default()
        };
        assert_eq!(node_line(&node), "string  string [object, custom, complexity 1]");
    }
}
