//! Weighted shortest paths and bounded neighborhood traversal

use crate::edge::{Direction, Relationship, TypeEdge};
use crate::error::{Error, Result};
use crate::limits::validate_traversal_depth;
use crate::node::NodeId;
use crate::store::GraphStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// A shortest path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Ordered node ids from source to target
    pub path: Vec<NodeId>,

    /// Sum of `11 - strength` over the traversed edges
    pub distance: u32,

    /// Edges realizing `path`, in traversal order
    pub edges: Vec<TypeEdge>,

    /// Human-readable rendering, e.g. `A uses B → B extends C`
    pub description: String,
}

/// Neighborhood traversal query (follows `NodeFilter` builder pattern)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalQuery {
    /// Starting node id
    pub start: NodeId,

    /// Maximum number of hops from `start`
    #[serde(default = "default_depth")]
    pub max_depth: u32,

    #[serde(default)]
    pub direction: Direction,

    /// Only follow these relationships (empty = all)
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

fn default_depth() -> u32 {
    2
}

impl TraversalQuery {
    pub fn new(start: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            max_depth: default_depth(),
            direction: Direction::Both,
            relationships: Vec::new(),
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// Result of a neighborhood traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalResult {
    pub start: NodeId,

    /// Reached nodes in breadth-first order, `start` first
    pub visited: Vec<NodeId>,

    pub stats: TraversalStats,
}

/// Traversal statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_traversed: usize,
    pub max_depth_reached: u32,
}

/// State for Dijkstra priority queue
#[derive(Clone, PartialEq, Eq)]
struct DijkstraState<'a> {
    cost: u32,
    node: &'a NodeId,
}

impl Ord for DijkstraState<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; equal costs pop the smaller node id first
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for DijkstraState<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Path finding over a store's directed edges
pub struct PathFinder;

impl PathFinder {
    /// Dijkstra shortest path where each edge costs `11 - strength`.
    ///
    /// Outgoing edges are scanned in ascending edge id order and a tentative
    /// distance is only replaced by a strictly smaller one, so among equal-cost
    /// alternatives the lowest edge id reached first wins.
    pub fn find_shortest_path(
        store: &GraphStore,
        source: &str,
        target: &str,
    ) -> Option<ShortestPath> {
        let source_node = store.get_node(source)?;
        let target_node = store.get_node(target)?;

        if source == target {
            return Some(ShortestPath {
                path: vec![source_node.id.clone()],
                distance: 0,
                edges: Vec::new(),
                description: String::new(),
            });
        }

        let mut dist: HashMap<&NodeId, u32> = HashMap::new();
        let mut parent: HashMap<&NodeId, &TypeEdge> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut found = None;

        dist.insert(&source_node.id, 0);
        heap.push(DijkstraState {
            cost: 0,
            node: &source_node.id,
        });

        while let Some(DijkstraState { cost, node }) = heap.pop() {
            if node == &target_node.id {
                found = Some(cost);
                break;
            }

            // Skip if we already found a better path
            if cost > dist.get(node).copied().unwrap_or(u32::MAX) {
                continue;
            }

            for edge in store.outgoing_edges(node.as_str()) {
                // Dangling edges only exist after a permissive import
                if !store.contains_node(edge.target.as_str()) {
                    continue;
                }

                let next_cost = cost + edge.cost();
                if next_cost < dist.get(&edge.target).copied().unwrap_or(u32::MAX) {
                    dist.insert(&edge.target, next_cost);
                    parent.insert(&edge.target, edge);
                    heap.push(DijkstraState {
                        cost: next_cost,
                        node: &edge.target,
                    });
                }
            }
        }

        let Some(distance) = found else {
            tracing::debug!("No path from {} to {}", source, target);
            return None;
        };

        let path = Self::reconstruct_path(store, &source_node.id, &target_node.id, &parent, distance);
        tracing::debug!(
            "Shortest path {} -> {}: {} hops, distance {}",
            source,
            target,
            path.edges.len(),
            distance
        );
        Some(path)
    }

    /// Breadth-first neighborhood of a node, bounded by depth
    pub fn neighborhood(store: &GraphStore, query: &TraversalQuery) -> Result<TraversalResult> {
        validate_traversal_depth(query.max_depth)?;
        if !store.contains_node(query.start.as_str()) {
            return Err(Error::NodeNotFound(query.start.to_string()));
        }

        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut order: Vec<NodeId> = Vec::new();
        let mut queue: VecDeque<(&NodeId, u32)> = VecDeque::new();
        let mut stats = TraversalStats::default();

        let start = &query.start;
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            stats.nodes_visited += 1;
            stats.max_depth_reached = stats.max_depth_reached.max(depth);
            order.push(current.clone());

            if depth >= query.max_depth {
                continue;
            }

            for edge in store.edges_of(current.as_str(), query.direction) {
                stats.edges_traversed += 1;

                // Apply relationship filter
                if !query.relationships.is_empty()
                    && !query.relationships.contains(&edge.relationship)
                {
                    continue;
                }

                let next = match query.direction {
                    Direction::Out => &edge.target,
                    Direction::In => &edge.source,
                    Direction::Both => match edge.other_end(current.as_str()) {
                        Some(next) => next,
                        None => continue,
                    },
                };

                if store.contains_node(next.as_str()) && visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        tracing::debug!(
            "Neighborhood of {} visited {} nodes, traversed {} edges",
            query.start,
            stats.nodes_visited,
            stats.edges_traversed
        );

        Ok(TraversalResult {
            start: query.start.clone(),
            visited: order,
            stats,
        })
    }

    /// Reconstruct path from parent map
    fn reconstruct_path(
        store: &GraphStore,
        start: &NodeId,
        end: &NodeId,
        parent: &HashMap<&NodeId, &TypeEdge>,
        distance: u32,
    ) -> ShortestPath {
        let mut nodes = vec![end.clone()];
        let mut edges: Vec<TypeEdge> = Vec::new();
        let mut current = end;

        while current != start {
            match parent.get(current) {
                Some(edge) => {
                    edges.push((*edge).clone());
                    nodes.push(edge.source.clone());
                    current = &edge.source;
                }
                None => break,
            }
        }

        nodes.reverse();
        edges.reverse();

        ShortestPath {
            description: Self::describe(store, &edges),
            path: nodes,
            distance,
            edges,
        }
    }

    /// Render edges as `A <rel> B → B <rel> C`
    fn describe(store: &GraphStore, edges: &[TypeEdge]) -> String {
        let name = |id: &NodeId| {
            store
                .get_node(id.as_str())
                .map(|n| n.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        edges
            .iter()
            .map(|e| format!("{} {} {}", name(&e.source), e.relationship, name(&e.target)))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}
