//! Whole-graph structural analysis
//!
//! All algorithms here are deliberately simple and sized for graphs of a few
//! hundred nodes. Edges whose endpoints are missing (possible only after a
//! permissive import) are ignored.

use crate::limits::{DEFAULT_CRITICAL_PATH_NODE_LIMIT, MAX_CRITICAL_PATH_EXTENSIONS};
use crate::node::NodeId;
use crate::store::GraphStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Tuning knobs for `StructuralAnalyzer::analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Largest cyclic graph on which the exhaustive critical-path search runs.
    /// Acyclic graphs are always solved exactly.
    #[serde(default = "default_critical_path_node_limit")]
    pub critical_path_node_limit: usize,
}

fn default_critical_path_node_limit() -> usize {
    DEFAULT_CRITICAL_PATH_NODE_LIMIT
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            critical_path_node_limit: default_critical_path_node_limit(),
        }
    }
}

impl AnalysisOptions {
    pub fn with_critical_path_node_limit(mut self, limit: usize) -> Self {
        self.critical_path_node_limit = limit;
        self
    }
}

/// Result of a structural analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    /// `(in + out) / max(n - 1, 1)` per node
    pub centrality: BTreeMap<NodeId, f64>,

    /// Undirected connected components with more than one node
    pub clusters: Vec<Vec<NodeId>>,

    /// Longest simple directed path by node count
    pub critical_path: Vec<NodeId>,

    /// True when the graph was cyclic and the exhaustive search was not run or
    /// ran out of budget
    pub critical_path_skipped: bool,

    /// Per node: sources of incoming extends/uses/constrains edges
    pub dependencies: BTreeMap<NodeId, Vec<NodeId>>,

    /// Per node: targets of outgoing extends/uses/constrains edges
    pub dependents: BTreeMap<NodeId, Vec<NodeId>>,

    /// Nodes with no incident edges
    pub isolated_nodes: Vec<NodeId>,

    /// Directed cycles, each listed from the re-entered node onwards
    pub circular_dependencies: Vec<Vec<NodeId>>,
}

/// Adjacency snapshot built once per analysis
struct Adjacency<'a> {
    nodes: Vec<&'a NodeId>,
    /// Directed successors, one entry per edge (parallel edges repeat)
    successors: BTreeMap<&'a NodeId, Vec<&'a NodeId>>,
    /// Undirected, de-duplicated neighbors
    neighbors: BTreeMap<&'a NodeId, BTreeSet<&'a NodeId>>,
    in_degree: BTreeMap<&'a NodeId, usize>,
    out_degree: BTreeMap<&'a NodeId, usize>,
}

impl<'a> Adjacency<'a> {
    fn build(store: &'a GraphStore) -> Self {
        let nodes: Vec<&NodeId> = store.nodes().map(|n| &n.id).collect();
        let mut successors: BTreeMap<&NodeId, Vec<&NodeId>> = BTreeMap::new();
        let mut neighbors: BTreeMap<&NodeId, BTreeSet<&NodeId>> = BTreeMap::new();
        let mut in_degree: BTreeMap<&NodeId, usize> = BTreeMap::new();
        let mut out_degree: BTreeMap<&NodeId, usize> = BTreeMap::new();

        for id in &nodes {
            successors.insert(id, Vec::new());
            neighbors.insert(id, BTreeSet::new());
            in_degree.insert(id, 0);
            out_degree.insert(id, 0);
        }

        for edge in store.edges() {
            let (Some(source), Some(target)) = (
                store.get_node(edge.source.as_str()),
                store.get_node(edge.target.as_str()),
            ) else {
                continue;
            };
            let (source, target) = (&source.id, &target.id);

            successors.entry(source).or_default().push(target);
            neighbors.entry(source).or_default().insert(target);
            neighbors.entry(target).or_default().insert(source);
            *out_degree.entry(source).or_default() += 1;
            *in_degree.entry(target).or_default() += 1;
        }

        Self {
            nodes,
            successors,
            neighbors,
            in_degree,
            out_degree,
        }
    }

    fn successors(&self, node: &NodeId) -> &[&'a NodeId] {
        self.successors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn degree(&self, node: &NodeId) -> usize {
        self.in_degree.get(node).copied().unwrap_or(0) + self.out_degree.get(node).copied().unwrap_or(0)
    }
}

/// Structural analysis engine
pub struct StructuralAnalyzer;

impl StructuralAnalyzer {
    /// Run every analysis over a store snapshot
    pub fn analyze(store: &GraphStore, options: &AnalysisOptions) -> GraphAnalysis {
        let adjacency = Adjacency::build(store);
        let (dependencies, dependents) = Self::dependency_maps(store);
        let critical_path = Self::critical_path_in(&adjacency, options.critical_path_node_limit);

        let analysis = GraphAnalysis {
            centrality: Self::centrality_in(&adjacency),
            clusters: Self::clusters_in(&adjacency),
            critical_path_skipped: critical_path.is_none(),
            critical_path: critical_path.unwrap_or_default(),
            dependencies,
            dependents,
            isolated_nodes: Self::isolated_in(&adjacency),
            circular_dependencies: Self::cycles_in(&adjacency),
        };

        tracing::debug!(
            "Analyzed {} nodes: {} clusters, {} isolated, {} cycles, critical path of {}",
            adjacency.nodes.len(),
            analysis.clusters.len(),
            analysis.isolated_nodes.len(),
            analysis.circular_dependencies.len(),
            analysis.critical_path.len()
        );
        analysis
    }

    /// Normalized degree centrality
    pub fn degree_centrality(store: &GraphStore) -> BTreeMap<NodeId, f64> {
        Self::centrality_in(&Adjacency::build(store))
    }

    /// Connected components (edges treated as undirected), singletons excluded
    pub fn clusters(store: &GraphStore) -> Vec<Vec<NodeId>> {
        Self::clusters_in(&Adjacency::build(store))
    }

    /// Nodes with no incident edges
    pub fn isolated_nodes(store: &GraphStore) -> Vec<NodeId> {
        Self::isolated_in(&Adjacency::build(store))
    }

    /// Directed cycles found by depth-first search
    pub fn circular_dependencies(store: &GraphStore) -> Vec<Vec<NodeId>> {
        Self::cycles_in(&Adjacency::build(store))
    }

    /// Longest simple path, or `None` when the graph is cyclic and larger than `node_limit`
    pub fn critical_path(store: &GraphStore, node_limit: usize) -> Option<Vec<NodeId>> {
        Self::critical_path_in(&Adjacency::build(store), node_limit)
    }

    /// Dependency and dependent maps restricted to structural relationships
    pub fn dependency_maps(
        store: &GraphStore,
    ) -> (BTreeMap<NodeId, Vec<NodeId>>, BTreeMap<NodeId, Vec<NodeId>>) {
        let mut dependencies: BTreeMap<&NodeId, BTreeSet<&NodeId>> = BTreeMap::new();
        let mut dependents: BTreeMap<&NodeId, BTreeSet<&NodeId>> = BTreeMap::new();

        for node in store.nodes() {
            dependencies.insert(&node.id, BTreeSet::new());
            dependents.insert(&node.id, BTreeSet::new());
        }

        for edge in store.edges().filter(|e| e.relationship.is_structural()) {
            if !store.contains_node(edge.source.as_str()) || !store.contains_node(edge.target.as_str()) {
                continue;
            }
            dependencies.entry(&edge.target).or_default().insert(&edge.source);
            dependents.entry(&edge.source).or_default().insert(&edge.target);
        }

        (to_owned_map(dependencies), to_owned_map(dependents))
    }

    fn centrality_in(adjacency: &Adjacency<'_>) -> BTreeMap<NodeId, f64> {
        let denominator = adjacency.nodes.len().saturating_sub(1).max(1) as f64;
        adjacency
            .nodes
            .iter()
            .map(|id| ((*id).clone(), adjacency.degree(id) as f64 / denominator))
            .collect()
    }

    fn clusters_in(adjacency: &Adjacency<'_>) -> Vec<Vec<NodeId>> {
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut clusters = Vec::new();

        for &root in &adjacency.nodes {
            if visited.contains(root) {
                continue;
            }

            let mut component = Vec::new();
            let mut stack = vec![root];
            visited.insert(root);

            while let Some(current) = stack.pop() {
                component.push(current.clone());
                if let Some(neighbors) = adjacency.neighbors.get(current) {
                    for &next in neighbors.iter().rev() {
                        if visited.insert(next) {
                            stack.push(next);
                        }
                    }
                }
            }

            if component.len() > 1 {
                clusters.push(component);
            }
        }

        clusters
    }

    fn isolated_in(adjacency: &Adjacency<'_>) -> Vec<NodeId> {
        adjacency
            .nodes
            .iter()
            .filter(|id| adjacency.degree(id) == 0)
            .map(|id| (*id).clone())
            .collect()
    }

    fn cycles_in(adjacency: &Adjacency<'_>) -> Vec<Vec<NodeId>> {
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut cycles: Vec<Vec<NodeId>> = Vec::new();

        for &root in &adjacency.nodes {
            if visited.contains(root) {
                continue;
            }
            let mut stack = Vec::new();
            for cycle in Self::find_cycles(root, adjacency, &mut visited, &mut stack) {
                if !cycles.contains(&cycle) {
                    cycles.push(cycle);
                }
            }
        }

        cycles
    }

    /// DFS from `node`; every back edge onto the recursion stack yields a cycle
    fn find_cycles<'a>(
        node: &'a NodeId,
        adjacency: &Adjacency<'a>,
        visited: &mut HashSet<&'a NodeId>,
        stack: &mut Vec<&'a NodeId>,
    ) -> Vec<Vec<NodeId>> {
        visited.insert(node);
        stack.push(node);
        let mut found = Vec::new();

        for &next in adjacency.successors(node) {
            if let Some(pos) = stack.iter().position(|n| *n == next) {
                found.push(stack[pos..].iter().map(|n| (*n).clone()).collect());
            } else if !visited.contains(next) {
                found.extend(Self::find_cycles(next, adjacency, visited, stack));
            }
        }

        stack.pop();
        found
    }

    fn critical_path_in(adjacency: &Adjacency<'_>, node_limit: usize) -> Option<Vec<NodeId>> {
        if let Some(order) = Self::topological_order(adjacency) {
            return Some(Self::longest_dag_path(adjacency, &order));
        }

        if adjacency.nodes.len() > node_limit {
            tracing::warn!(
                "Skipping critical path: cyclic graph has {} nodes (limit {})",
                adjacency.nodes.len(),
                node_limit
            );
            return None;
        }

        let mut search = PathSearch {
            adjacency,
            best: Vec::new(),
            budget: MAX_CRITICAL_PATH_EXTENSIONS,
            exhausted: false,
        };
        for &start in &adjacency.nodes {
            let mut path = vec![start];
            let mut on_path: HashSet<&NodeId> = HashSet::from([start]);
            if !search.extend(&mut path, &mut on_path) {
                break;
            }
        }

        if search.exhausted {
            tracing::warn!(
                "Skipping critical path: search gave up after {} path extensions",
                MAX_CRITICAL_PATH_EXTENSIONS
            );
            return None;
        }
        Some(search.best.into_iter().cloned().collect())
    }

    /// Kahn's algorithm; `None` if the graph has a cycle
    fn topological_order<'a>(adjacency: &Adjacency<'a>) -> Option<Vec<&'a NodeId>> {
        let mut remaining: BTreeMap<&NodeId, usize> = adjacency.in_degree.clone();
        let mut queue: VecDeque<&NodeId> = adjacency
            .nodes
            .iter()
            .copied()
            .filter(|id| remaining.get(id).copied().unwrap_or(0) == 0)
            .collect();
        let mut order = Vec::with_capacity(adjacency.nodes.len());

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &next in adjacency.successors(node) {
                if let Some(count) = remaining.get_mut(next) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        (order.len() == adjacency.nodes.len()).then_some(order)
    }

    /// Longest path by node count over a topological order
    fn longest_dag_path(adjacency: &Adjacency<'_>, order: &[&NodeId]) -> Vec<NodeId> {
        let mut length: BTreeMap<&NodeId, usize> = BTreeMap::new();
        let mut next_hop: BTreeMap<&NodeId, &NodeId> = BTreeMap::new();

        for &node in order.iter().rev() {
            let mut best_len = 1;
            for &next in adjacency.successors(node) {
                let candidate = 1 + length.get(next).copied().unwrap_or(1);
                if candidate > best_len {
                    best_len = candidate;
                    next_hop.insert(node, next);
                }
            }
            length.insert(node, best_len);
        }

        let mut start: Option<&NodeId> = None;
        let mut start_len = 0;
        for &node in &adjacency.nodes {
            let len = length.get(node).copied().unwrap_or(0);
            if len > start_len {
                start_len = len;
                start = Some(node);
            }
        }

        let mut path = Vec::with_capacity(start_len);
        let mut current = start;
        while let Some(node) = current {
            path.push(node.clone());
            current = next_hop.get(node).copied();
        }
        path
    }
}

/// Budgeted exhaustive DFS over simple paths
struct PathSearch<'g, 'a> {
    adjacency: &'g Adjacency<'a>,
    best: Vec<&'a NodeId>,
    budget: usize,
    exhausted: bool,
}

impl<'g, 'a> PathSearch<'g, 'a> {
    /// Try every simple extension of `path`; `false` stops the whole search
    fn extend(&mut self, path: &mut Vec<&'a NodeId>, on_path: &mut HashSet<&'a NodeId>) -> bool {
        let adjacency = self.adjacency;
        if path.len() > self.best.len() {
            self.best.clone_from(path);
        }
        // A path through every node cannot be beaten
        if self.best.len() == adjacency.nodes.len() {
            return false;
        }

        let Some(&last) = path.last() else {
            return true;
        };

        for &next in adjacency.successors(last) {
            if on_path.contains(next) {
                continue;
            }
            if self.budget == 0 {
                self.exhausted = true;
                return false;
            }
            self.budget -= 1;

            on_path.insert(next);
            path.push(next);
            let keep_going = self.extend(path, on_path);
            path.pop();
            on_path.remove(next);

            if !keep_going {
                return false;
            }
        }
        true
    }
}

fn to_owned_map(map: BTreeMap<&NodeId, BTreeSet<&NodeId>>) -> BTreeMap<NodeId, Vec<NodeId>> {
    map.into_iter()
        .map(|(k, v)| (k.clone(), v.into_iter().cloned().collect()))
        .collect()
}
