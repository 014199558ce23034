//! Graphviz DOT rendering

use typegraph_core::{GraphStore, Relationship, TypeCategory};

/// Fill and stroke colors used in DOT output
trait DotColor {
    fn dot_color(&self) -> &'static str;
}

impl DotColor for TypeCategory {
    fn dot_color(&self) -> &'static str {
        match self {
            TypeCategory::BuiltIn => "#dbeafe",
            TypeCategory::UserDefined => "#dcfce7",
            TypeCategory::Utility => "#fef3c7",
            TypeCategory::Advanced => "#f3e8ff",
            TypeCategory::Custom => "#f1f5f9",
        }
    }
}

impl DotColor for Relationship {
    fn dot_color(&self) -> &'static str {
        match self {
            Relationship::Extends => "#2563eb",
            Relationship::Implements => "#16a34a",
            Relationship::Composes => "#9333ea",
            Relationship::Uses => "#64748b",
            Relationship::Constrains => "#dc2626",
            Relationship::Transforms => "#ea580c",
            Relationship::Returns => "#0891b2",
            Relationship::Accepts => "#0d9488",
            Relationship::Contains => "#ca8a04",
        }
    }
}

/// Render the graph as a Graphviz digraph
pub fn to_dot(store: &GraphStore) -> String {
    let mut out = String::new();
    out.push_str(&format!("digraph \"{}\" {{\n", escape_dot(&store.metadata().name)));
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\", fontsize=10];\n");
    out.push_str("  edge [fontname=\"Helvetica\", fontsize=8];\n");
    out.push('\n');

    for node in store.nodes() {
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\", tooltip=\"{}\"];\n",
            escape_dot(node.id.as_str()),
            escape_dot(&node.name),
            node.category.dot_color(),
            escape_dot(&node.description),
        ));
    }

    out.push('\n');

    for edge in store.edges() {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", color=\"{}\", weight={}];\n",
            escape_dot(edge.source.as_str()),
            escape_dot(edge.target.as_str()),
            edge.relationship,
            edge.relationship.dot_color(),
            edge.strength,
        ));
    }

    out.push_str("}\n");
    out
}

/// Escape a string for a quoted DOT id or label
fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace('\r', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegraph_core::{NewTypeEdge, NewTypeNode, TypeKind};

    #[test]
    fn test_dot_header_and_counts() {
        let store = GraphStore::with_builtin_catalogue();
        let dot = to_dot(&store);

        assert!(dot.starts_with("digraph \"TypeScript Type System\" {\n"));
        assert!(dot.trim_end().ends_with('}'));
        assert_eq!(dot.matches(" -> ").count(), store.edge_count());
        assert_eq!(dot.matches("fillcolor=").count(), store.node_count());
    }

    #[test]
    fn test_dot_edge_attributes() {
        let mut store = GraphStore::new("g", "");
        store.add_node(NewTypeNode::new("A", TypeKind::Class, TypeCategory::UserDefined).with_id("a"));
        store.add_node(NewTypeNode::new("B", TypeKind::Interface, TypeCategory::UserDefined).with_id("b"));
        store
            .add_edge(NewTypeEdge::new("a", "b", Relationship::Implements).with_strength(9))
            .unwrap();

        let dot = to_dot(&store);
        assert!(dot.contains("\"a\" -> \"b\" [label=\"implements\", color=\"#16a34a\", weight=9];"));
        assert!(dot.contains("\"a\" [label=\"A\", fillcolor=\"#dcfce7\""));
    }

    #[test]
    fn test_dot_escapes_strings() {
        let mut store = GraphStore::new("say \"hi\"", "");
        store.add_node(
            NewTypeNode::new("Quote\"d", TypeKind::Literal, TypeCategory::Custom)
                .with_id("q")
                .with_description("line one\nline two"),
        );

        let dot = to_dot(&store);
        assert!(dot.starts_with("digraph \"say \\\"hi\\\"\""));
        assert!(dot.contains("label=\"Quote\\\"d\""));
        assert!(dot.contains("line one\\nline two"));
    }

    #[test]
    fn test_dot_escapes_carriage_returns() {
        let mut store = GraphStore::new("g", "");
        store.add_node(
            NewTypeNode::new("Crlf", TypeKind::Literal, TypeCategory::Custom)
                .with_id("c")
                .with_description("first\r\nsecond\rthird"),
        );

        let dot = to_dot(&store);
        assert!(!dot.contains('\r'));
        assert!(dot.contains("first\\nsecond\\nthird"));
    }
}
