//! Read-only graph views consumed by the measures.
//!
//! - [`GraphView`] — the minimal interface every measure works against
//! - [`MeasureGraph`] — petgraph-backed implementation with vertex ↔ NodeIndex mapping
//! - [`InducedSubgraph`] — a filtered view that hides a set of removed vertices
//!   without copying the underlying graph

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only access to a graph snapshot.
///
/// Undirected implementations must answer `has_edge(u, v) == has_edge(v, u)`
/// and list every incident vertex in `neighbors`. Directed implementations
/// list successors only.
pub trait GraphView {
    type Vertex: Clone + Eq + Hash + Debug;

    /// All vertices, in a stable enumeration order.
    fn vertices(&self) -> Vec<Self::Vertex>;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    fn has_edge(&self, from: &Self::Vertex, to: &Self::Vertex) -> bool;

    /// Adjacent vertices (successors for a directed graph), without duplicates.
    fn neighbors(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex>;

    fn edge_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// Edge cost used by the distance computation. Unweighted views keep the
    /// default of 1.0 for every existing edge.
    fn edge_weight(&self, from: &Self::Vertex, to: &Self::Vertex) -> Option<f64> {
        self.has_edge(from, to).then_some(1.0)
    }

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.neighbors(vertex).len()
    }
}

// ============================================================================
// MeasureGraph — petgraph wrapper with vertex mapping
// ============================================================================

/// Wrapper around `petgraph::DiGraph` with a vertex → NodeIndex map.
///
/// Undirected graphs store every edge once and answer lookups in both
/// directions, the same way the analytics code treats a directed petgraph
/// graph as undirected by walking both edge directions.
#[derive(Debug, Clone)]
pub struct MeasureGraph<V> {
    graph: DiGraph<V, f64>,
    index: HashMap<V, NodeIndex>,
    directed: bool,
}

impl<V: Clone + Eq + Hash + Debug> MeasureGraph<V> {
    pub fn undirected() -> Self {
        Self::with_capacity(false, 0, 0)
    }

    pub fn directed() -> Self {
        Self::with_capacity(true, 0, 0)
    }

    pub fn with_capacity(directed: bool, vertices: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(vertices, edges),
            index: HashMap::with_capacity(vertices),
            directed,
        }
    }

    /// Add a vertex. Returns the existing index if the vertex is already present.
    pub fn add_vertex(&mut self, vertex: V) -> NodeIndex {
        if let Some(&idx) = self.index.get(&vertex) {
            return idx;
        }
        let idx = self.graph.add_node(vertex.clone());
        self.index.insert(vertex, idx);
        idx
    }

    /// Add an edge of weight 1.0, creating missing endpoints.
    pub fn add_edge(&mut self, from: V, to: V) -> EdgeIndex {
        self.add_weighted_edge(from, to, 1.0)
    }

    /// Add an edge, creating missing endpoints. Re-adding an existing edge
    /// overwrites its weight instead of creating a parallel edge.
    pub fn add_weighted_edge(&mut self, from: V, to: V, weight: f64) -> EdgeIndex {
        let a = self.add_vertex(from);
        let b = self.add_vertex(to);
        match self.find_edge(a, b) {
            Some(edge) => {
                self.graph[edge] = weight;
                edge
            }
            None => self.graph.add_edge(a, b, weight),
        }
    }

    pub fn get_index(&self, vertex: &V) -> Option<NodeIndex> {
        self.index.get(vertex).copied()
    }

    fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b).or_else(|| {
            if self.directed {
                None
            } else {
                self.graph.find_edge(b, a)
            }
        })
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphView for MeasureGraph<V> {
    type Vertex = V;

    fn vertices(&self) -> Vec<V> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    fn has_edge(&self, from: &V, to: &V) -> bool {
        self.edge_weight(from, to).is_some()
    }

    fn neighbors(&self, vertex: &V) -> Vec<V> {
        let Some(idx) = self.get_index(vertex) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        let outgoing = self.graph.neighbors_directed(idx, Direction::Outgoing);
        let incoming = if self.directed {
            None
        } else {
            Some(self.graph.neighbors_directed(idx, Direction::Incoming))
        };
        for n in outgoing.chain(incoming.into_iter().flatten()) {
            if seen.insert(n) {
                result.push(self.graph[n].clone());
            }
        }
        result
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edge_weight(&self, from: &V, to: &V) -> Option<f64> {
        let a = self.get_index(from)?;
        let b = self.get_index(to)?;
        self.find_edge(a, b).map(|edge| self.graph[edge])
    }

    fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }
}

// ============================================================================
// InducedSubgraph — filtered view
// ============================================================================

/// The subgraph induced by every vertex of `graph` except those in `removed`.
/// Construction borrows both sides and allocates nothing.
pub struct InducedSubgraph<'a, G: GraphView> {
    graph: &'a G,
    removed: &'a HashSet<G::Vertex>,
}

impl<'a, G: GraphView> InducedSubgraph<'a, G> {
    pub fn new(graph: &'a G, removed: &'a HashSet<G::Vertex>) -> Self {
        Self { graph, removed }
    }

    fn keeps(&self, vertex: &G::Vertex) -> bool {
        !self.removed.contains(vertex)
    }
}

impl<G: GraphView> GraphView for InducedSubgraph<'_, G> {
    type Vertex = G::Vertex;

    fn vertices(&self) -> Vec<G::Vertex> {
        self.graph
            .vertices()
            .into_iter()
            .filter(|v| self.keeps(v))
            .collect()
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.keeps(vertex) && self.graph.contains_vertex(vertex)
    }

    fn has_edge(&self, from: &G::Vertex, to: &G::Vertex) -> bool {
        self.keeps(from) && self.keeps(to) && self.graph.has_edge(from, to)
    }

    fn neighbors(&self, vertex: &G::Vertex) -> Vec<G::Vertex> {
        if !self.keeps(vertex) {
            return Vec::new();
        }
        self.graph
            .neighbors(vertex)
            .into_iter()
            .filter(|v| self.keeps(v))
            .collect()
    }

    fn edge_count(&self) -> usize {
        let ends: usize = self
            .vertices()
            .iter()
            .map(|v| {
                self.neighbors(v)
                    .iter()
                    .map(|u| if u == v && !self.is_directed() { 2 } else { 1 })
                    .sum::<usize>()
            })
            .sum();
        if self.is_directed() {
            ends
        } else {
            ends / 2
        }
    }

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn edge_weight(&self, from: &G::Vertex, to: &G::Vertex) -> Option<f64> {
        if self.keeps(from) && self.keeps(to) {
            self.graph.edge_weight(from, to)
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> MeasureGraph<&'static str> {
        let mut g = MeasureGraph::undirected();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "d");
        g
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g: MeasureGraph<&str> = MeasureGraph::undirected();
        let a1 = g.add_vertex("a");
        let a2 = g.add_vertex("a");
        assert_eq!(a1, a2);
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_undirected_edge_symmetric() {
        let g = path_graph();
        assert!(g.has_edge(&"a", &"b"));
        assert!(g.has_edge(&"b", &"a"));
        assert!(!g.has_edge(&"a", &"c"));
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(&"b"), 2);
    }

    #[test]
    fn test_undirected_readd_reverse_does_not_duplicate() {
        let mut g = path_graph();
        g.add_weighted_edge("b", "a", 2.5);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edge_weight(&"a", &"b"), Some(2.5));
    }

    #[test]
    fn test_directed_edge_one_way() {
        let mut g = MeasureGraph::directed();
        g.add_edge(1u32, 2u32);
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
        assert_eq!(g.neighbors(&1), vec![2]);
        assert!(g.neighbors(&2).is_empty());
    }

    #[test]
    fn test_vertices_keep_insertion_order() {
        let g = path_graph();
        assert_eq!(g.vertices(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unknown_vertex_has_no_neighbors() {
        let g = path_graph();
        assert!(g.neighbors(&"zz").is_empty());
        assert!(!g.contains_vertex(&"zz"));
        assert_eq!(g.edge_weight(&"zz", &"a"), None);
    }

    #[test]
    fn test_induced_subgraph_hides_removed() {
        let g = path_graph();
        let removed: HashSet<&str> = ["b"].into_iter().collect();
        let sub = InducedSubgraph::new(&g, &removed);

        assert_eq!(sub.vertices(), vec!["a", "c", "d"]);
        assert_eq!(sub.vertex_count(), 3);
        assert!(!sub.contains_vertex(&"b"));
        assert!(!sub.has_edge(&"a", &"b"));
        assert!(sub.has_edge(&"c", &"d"));
        assert!(sub.neighbors(&"a").is_empty());
        assert_eq!(sub.neighbors(&"c"), vec!["d"]);
        assert_eq!(sub.edge_count(), 1);
    }

    #[test]
    fn test_induced_subgraph_counts_self_loop_once() {
        let mut g = MeasureGraph::undirected();
        g.add_edge("a", "a");
        g.add_edge("a", "b");
        let removed = HashSet::new();
        let sub = InducedSubgraph::new(&g, &removed);
        assert_eq!(sub.edge_count(), 2);
    }
}
