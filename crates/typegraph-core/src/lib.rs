//! TypeGraph Core - Graph engine for type-relationship graphs
//!
//! This crate provides the node and edge model, the in-memory `GraphStore`,
//! and the read-only engines (query, path finding, structural analysis)
//! that operate on it.

pub mod analysis;
pub mod catalogue;
pub mod edge;
pub mod error;
pub mod limits;
pub mod metadata;
pub mod node;
pub mod path;
pub mod query;
pub mod stats;
pub mod store;

pub use analysis::{AnalysisOptions, GraphAnalysis, StructuralAnalyzer};
pub use edge::{Direction, EdgeId, EdgeUpdate, NewTypeEdge, Relationship, TypeEdge};
pub use error::{Endpoint, Error, Result};
pub use metadata::{GraphMetadata, Metadata, MetadataValue};
pub use node::{NewTypeNode, NodeId, NodeUpdate, TypeCategory, TypeKind, TypeNode};
pub use path::{PathFinder, ShortestPath, TraversalQuery, TraversalResult, TraversalStats};
pub use query::{NodeFilter, QueryEngine};
pub use stats::GraphStats;
pub use store::GraphStore;
