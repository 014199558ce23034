//! Type edge (directed relationship) types

use crate::limits::{clamp_strength, saturating_u8, DEFAULT_STRENGTH};
use crate::metadata::Metadata;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, collision-resistant id
    pub fn generate() -> Self {
        Self(format!("edge_{}", Ulid::new().to_string().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for EdgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Semantics of a directed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Extends,
    Implements,
    Composes,
    #[default]
    Uses,
    Constrains,
    Transforms,
    Returns,
    Accepts,
    Contains,
}

impl Relationship {
    pub const ALL: [Relationship; 9] = [
        Self::Extends,
        Self::Implements,
        Self::Composes,
        Self::Uses,
        Self::Constrains,
        Self::Transforms,
        Self::Returns,
        Self::Accepts,
        Self::Contains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Composes => "composes",
            Self::Uses => "uses",
            Self::Constrains => "constrains",
            Self::Transforms => "transforms",
            Self::Returns => "returns",
            Self::Accepts => "accepts",
            Self::Contains => "contains",
        }
    }

    /// Relationships that express a structural dependency of the target on the source.
    /// Compositional kinds are excluded.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Extends | Self::Uses | Self::Constrains)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| format!("unknown relationship: {}", s))
    }
}

/// Direction for neighbor lookups and traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges pointing at the node
    In,
    /// Edges leaving the node
    Out,
    #[default]
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" | "incoming" => Ok(Self::In),
            "out" | "outgoing" => Ok(Self::Out),
            "both" => Ok(Self::Both),
            _ => Err(format!("unknown direction: {}", s)),
        }
    }
}

/// A directed relationship between two type nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeEdge {
    pub id: EdgeId,

    pub source: NodeId,

    pub target: NodeId,

    pub relationship: Relationship,

    /// 1 (weak) to 10 (strong); pathfinding cost is `11 - strength`
    #[serde(deserialize_with = "saturating_u8")]
    pub strength: u8,

    pub description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,

    pub metadata: Metadata,
}

impl Default for TypeEdge {
    fn default() -> Self {
        Self {
            id: EdgeId::default(),
            source: NodeId::default(),
            target: NodeId::default(),
            relationship: Relationship::default(),
            strength: DEFAULT_STRENGTH,
            description: String::new(),
            examples: Vec::new(),
            metadata: Metadata::new(),
        }
    }
}

impl TypeEdge {
    /// Check if this edge touches a given node
    pub fn involves(&self, node: &str) -> bool {
        self.source.as_str() == node || self.target.as_str() == node
    }

    /// Traversal cost: stronger relationships are closer
    pub fn cost(&self) -> u32 {
        11 - u32::from(self.strength.min(10))
    }

    /// The endpoint opposite `node`, or `None` if the edge does not touch it
    pub fn other_end(&self, node: &str) -> Option<&NodeId> {
        if self.source.as_str() == node {
            Some(&self.target)
        } else if self.target.as_str() == node {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Apply a partial update, clamping strength
    pub fn apply(&mut self, update: EdgeUpdate) {
        if let Some(relationship) = update.relationship {
            self.relationship = relationship;
        }
        if let Some(strength) = update.strength {
            self.strength = clamp_strength(strength);
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(examples) = update.examples {
            self.examples = examples;
        }
        if let Some(metadata) = update.metadata {
            self.metadata.extend(metadata);
        }
    }
}

/// Data for creating a new edge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTypeEdge {
    /// Explicit id; generated by the store when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EdgeId>,
    pub source: NodeId,
    pub target: NodeId,
    pub relationship: Relationship,
    /// Unclamped; the store clamps into `[1, 10]`
    #[serde(default = "default_strength")]
    pub strength: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_strength() -> i64 {
    i64::from(DEFAULT_STRENGTH)
}

impl From<TypeEdge> for NewTypeEdge {
    fn from(edge: TypeEdge) -> Self {
        Self {
            id: Some(edge.id),
            source: edge.source,
            target: edge.target,
            relationship: edge.relationship,
            strength: i64::from(edge.strength),
            description: edge.description,
            examples: edge.examples,
            metadata: edge.metadata,
        }
    }
}

impl NewTypeEdge {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relationship: Relationship,
    ) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            relationship,
            strength: default_strength(),
            description: String::new(),
            examples: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_strength(mut self, strength: i64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// Partial field set for `GraphStore::update_edge`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeUpdate {
    pub relationship: Option<Relationship>,
    pub strength: Option<i64>,
    pub description: Option<String>,
    pub examples: Option<Vec<String>>,
    pub metadata: Option<Metadata>,
}

impl EdgeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn strength(mut self, strength: i64) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(strength: u8) -> TypeEdge {
        TypeEdge {
            id: EdgeId::new("e1"),
            source: NodeId::new("a"),
            target: NodeId::new("b"),
            strength,
            ..TypeEdge::default()
        }
    }

    #[test]
    fn test_cost_is_inverse_of_strength() {
        assert_eq!(edge(10).cost(), 1);
        assert_eq!(edge(9).cost(), 2);
        assert_eq!(edge(1).cost(), 10);
    }

    #[test]
    fn test_involves_and_other_end() {
        let e = edge(5);
        assert!(e.involves("a"));
        assert!(e.involves("b"));
        assert!(!e.involves("c"));
        assert_eq!(e.other_end("a"), Some(&NodeId::new("b")));
        assert_eq!(e.other_end("b"), Some(&NodeId::new("a")));
        assert_eq!(e.other_end("c"), None);
    }

    #[test]
    fn test_edge_id_from_owned_string() {
        let id = format!("{}-{}-{}", "a", Relationship::Uses, "b");
        let data = NewTypeEdge::new("a", "b", Relationship::Uses).with_id(id);
        assert_eq!(data.id, Some(EdgeId::new("a-uses-b")));
    }

    #[test]
    fn test_apply_update_clamps_strength() {
        let mut e = edge(5);
        e.apply(EdgeUpdate::new().strength(42).relationship(Relationship::Extends));
        assert_eq!(e.strength, 10);
        assert_eq!(e.relationship, Relationship::Extends);

        e.apply(EdgeUpdate::new().strength(-1));
        assert_eq!(e.strength, 1);
    }

    #[test]
    fn test_structural_relationships() {
        let structural: Vec<Relationship> = Relationship::ALL
            .iter()
            .copied()
            .filter(Relationship::is_structural)
            .collect();
        assert_eq!(
            structural,
            vec![Relationship::Extends, Relationship::Uses, Relationship::Constrains]
        );
    }

    #[test]
    fn test_relationship_parse() {
        assert_eq!("EXTENDS".parse::<Relationship>(), Ok(Relationship::Extends));
        assert!("inherits".parse::<Relationship>().is_err());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("out".parse::<Direction>(), Ok(Direction::Out));
        assert_eq!("Incoming".parse::<Direction>(), Ok(Direction::In));
        assert_eq!(Direction::default().to_string(), "both");
        assert!("sideways".parse::<Direction>().is_err());
    }
}
