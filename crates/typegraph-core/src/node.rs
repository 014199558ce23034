//! Type node (vertex) types

use crate::limits::{clamp_complexity, saturating_u8};
use crate::metadata::{Metadata, MetadataValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, collision-resistant id
    pub fn generate() -> Self {
        Self(format!("node_{}", Ulid::new().to_string().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Structural kind of a type concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive,
    #[default]
    Object,
    Array,
    Function,
    Generic,
    Utility,
    Interface,
    Class,
    Enum,
    Union,
    Intersection,
    Literal,
    Conditional,
}

impl TypeKind {
    pub const ALL: [TypeKind; 13] = [
        Self::Primitive,
        Self::Object,
        Self::Array,
        Self::Function,
        Self::Generic,
        Self::Utility,
        Self::Interface,
        Self::Class,
        Self::Enum,
        Self::Union,
        Self::Intersection,
        Self::Literal,
        Self::Conditional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Object => "object",
            Self::Array => "array",
            Self::Function => "function",
            Self::Generic => "generic",
            Self::Utility => "utility",
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Literal => "literal",
            Self::Conditional => "conditional",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| format!("unknown type kind: {}", s))
    }
}

/// Origin/audience category of a type concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeCategory {
    BuiltIn,
    UserDefined,
    Utility,
    Advanced,
    #[default]
    Custom,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 5] = [
        Self::BuiltIn,
        Self::UserDefined,
        Self::Utility,
        Self::Advanced,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuiltIn => "built-in",
            Self::UserDefined => "user-defined",
            Self::Utility => "utility",
            Self::Advanced => "advanced",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown type category: {}", s))
    }
}

/// A type concept in the graph (a node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeNode {
    /// Unique identifier
    pub id: NodeId,

    /// Display name (e.g. "string", "Partial<T>")
    pub name: String,

    pub kind: TypeKind,

    pub category: TypeCategory,

    pub description: String,

    /// Learning difficulty, 1 (basic) to 5 (advanced)
    #[serde(deserialize_with = "saturating_u8")]
    pub complexity: u8,

    /// Code snippets illustrating the concept
    pub examples: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,

    /// Related node ids; informational only, these are not edges
    pub dependencies: Vec<NodeId>,

    pub metadata: Metadata,
}

impl Default for TypeNode {
    fn default() -> Self {
        Self {
            id: NodeId::default(),
            name: String::new(),
            kind: TypeKind::default(),
            category: TypeCategory::default(),
            description: String::new(),
            complexity: 1,
            examples: Vec::new(),
            documentation: None,
            source_code: None,
            dependencies: Vec::new(),
            metadata: Metadata::new(),
        }
    }
}

impl TypeNode {
    /// Build a stored node from creation data under the given id
    pub fn from_new(id: NodeId, data: NewTypeNode) -> Self {
        Self {
            id,
            name: data.name,
            kind: data.kind,
            category: data.category,
            description: data.description,
            complexity: clamp_complexity(data.complexity),
            examples: data.examples,
            documentation: data.documentation,
            source_code: data.source_code,
            dependencies: data.dependencies,
            metadata: data.metadata,
        }
    }

    /// Apply a partial update, clamping complexity
    pub fn apply(&mut self, update: NodeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(complexity) = update.complexity {
            self.complexity = clamp_complexity(complexity);
        }
        if let Some(examples) = update.examples {
            self.examples = examples;
        }
        if let Some(documentation) = update.documentation {
            self.documentation = Some(documentation);
        }
        if let Some(source_code) = update.source_code {
            self.source_code = Some(source_code);
        }
        if let Some(dependencies) = update.dependencies {
            self.dependencies = dependencies;
        }
        if let Some(metadata) = update.metadata {
            self.metadata.extend(metadata);
        }
    }

    /// Text fields searched by the query engine
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [Some(self.name.as_str()), Some(self.description.as_str()), self.documentation.as_deref()]
            .into_iter()
            .flatten()
            .chain(self.examples.iter().map(String::as_str))
    }
}

/// Data for creating a new node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTypeNode {
    /// Explicit id; generated by the store when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub name: String,
    pub kind: TypeKind,
    pub category: TypeCategory,
    #[serde(default)]
    pub description: String,
    /// Unclamped; the store clamps into `[1, 5]`
    #[serde(default = "default_complexity")]
    pub complexity: i64,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<NodeId>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_complexity() -> i64 {
    1
}

impl From<TypeNode> for NewTypeNode {
    fn from(node: TypeNode) -> Self {
        Self {
            id: Some(node.id),
            name: node.name,
            kind: node.kind,
            category: node.category,
            description: node.description,
            complexity: i64::from(node.complexity),
            examples: node.examples,
            documentation: node.documentation,
            source_code: node.source_code,
            dependencies: node.dependencies,
            metadata: node.metadata,
        }
    }
}

impl NewTypeNode {
    pub fn new(name: impl Into<String>, kind: TypeKind, category: TypeCategory) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind,
            category,
            description: String::new(),
            complexity: default_complexity(),
            examples: Vec::new(),
            documentation: None,
            source_code: None,
            dependencies: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_complexity(mut self, complexity: i64) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_source_code(mut self, source_code: impl Into<String>) -> Self {
        self.source_code = Some(source_code.into());
        self
    }

    pub fn with_dependency(mut self, id: impl Into<NodeId>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Partial field set for `GraphStore::update_node`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeUpdate {
    pub name: Option<String>,
    pub kind: Option<TypeKind>,
    pub category: Option<TypeCategory>,
    pub description: Option<String>,
    pub complexity: Option<i64>,
    pub examples: Option<Vec<String>>,
    pub documentation: Option<String>,
    pub source_code: Option<String>,
    pub dependencies: Option<Vec<NodeId>>,
    /// Merged into the existing metadata, key by key
    pub metadata: Option<Metadata>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: TypeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn complexity(mut self, complexity: i64) -> Self {
        self.complexity = Some(complexity);
        self
    }

    pub fn examples(mut self, examples: Vec<String>) -> Self {
        self.examples = Some(examples);
        self
    }

    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("node_"));
    }

    #[test]
    fn test_from_new_clamps_complexity() {
        let data = NewTypeNode::new("Deep", TypeKind::Conditional, TypeCategory::Advanced)
            .with_complexity(12);
        let node = TypeNode::from_new(NodeId::new("deep"), data);
        assert_eq!(node.complexity, 5);

        let data = NewTypeNode::new("Flat", TypeKind::Primitive, TypeCategory::BuiltIn)
            .with_complexity(-3);
        let node = TypeNode::from_new(NodeId::new("flat"), data);
        assert_eq!(node.complexity, 1);
    }

    #[test]
    fn test_apply_update() {
        let data = NewTypeNode::new("Box", TypeKind::Interface, TypeCategory::UserDefined)
            .with_metadata("difficulty", "easy");
        let mut node = TypeNode::from_new(NodeId::new("box"), data);

        let mut extra = Metadata::new();
        extra.insert("lesson".to_string(), MetadataValue::from(3_i64));
        node.apply(NodeUpdate {
            metadata: Some(extra),
            ..NodeUpdate::new().description("A container").complexity(99)
        });

        assert_eq!(node.name, "Box");
        assert_eq!(node.description, "A container");
        assert_eq!(node.complexity, 5);
        assert_eq!(node.metadata.len(), 2);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&TypeCategory::BuiltIn).unwrap(), "\"built-in\"");
        assert_eq!(serde_json::to_string(&TypeCategory::UserDefined).unwrap(), "\"user-defined\"");
        assert_eq!(serde_json::to_string(&TypeKind::Intersection).unwrap(), "\"intersection\"");
        assert_eq!("Built-In".parse::<TypeCategory>(), Ok(TypeCategory::BuiltIn));
        assert_eq!("union".parse::<TypeKind>(), Ok(TypeKind::Union));
        assert!("tuple".parse::<TypeKind>().is_err());
    }

    #[test]
    fn test_searchable_fields() {
        let data = NewTypeNode::new("Readonly", TypeKind::Utility, TypeCategory::Utility)
            .with_description("Makes properties readonly")
            .with_example("Readonly<Point>")
            .with_documentation("See handbook");
        let node = TypeNode::from_new(NodeId::new("readonly"), data);
        let fields: Vec<&str> = node.searchable_fields().collect();
        assert_eq!(
            fields,
            vec!["Readonly", "Makes properties readonly", "See handbook", "Readonly<Point>"]
        );
    }

    #[test]
    fn test_source_code_serializes_camel_case() {
        let data = NewTypeNode::new("Fn", TypeKind::Function, TypeCategory::BuiltIn)
            .with_source_code("type Fn = () => void;");
        let node = TypeNode::from_new(NodeId::new("fn"), data);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"sourceCode\""));
    }
}
