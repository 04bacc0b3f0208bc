//! All-pairs shortest-path distances.
//!
//! [`DistanceMatrix`] runs Floyd–Warshall over a [`GraphView`] snapshot and is
//! immutable afterwards. Cost is `O(n³)` time and `O(n²)` memory.
//!
//! [`DistanceCache`] keeps matrices for graph snapshots the caller knows are
//! unchanged.

use lru::LruCache;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use super::error::{MeasureError, Result};
use super::view::GraphView;

// ============================================================================
// DistanceMatrix
// ============================================================================

/// Shortest-path distance between every ordered pair of vertices.
///
/// Unreachable pairs hold `f64::INFINITY`; `distance(v, v)` is always 0.
#[derive(Debug, Clone)]
pub struct DistanceMatrix<V> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    /// Row-major `n × n`
    dist: Vec<f64>,
    directed: bool,
}

impl<V: Clone + Eq + Hash + Debug> DistanceMatrix<V> {
    /// Compute all-pairs distances for `graph`.
    ///
    /// Edge costs come from [`GraphView::edge_weight`]; a cost that is not
    /// strictly positive fails with [`MeasureError::InvalidWeight`].
    pub fn compute<G>(graph: &G) -> Result<Self>
    where
        G: GraphView<Vertex = V>,
    {
        let vertices = graph.vertices();
        let n = vertices.len();
        let directed = graph.is_directed();
        let index: HashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        let mut dist = vec![f64::INFINITY; n * n];
        for i in 0..n {
            dist[i * n + i] = 0.0;
        }

        for (i, v) in vertices.iter().enumerate() {
            for u in graph.neighbors(v) {
                let Some(&j) = index.get(&u) else {
                    continue;
                };
                if i == j {
                    continue;
                }
                let weight = graph.edge_weight(v, &u).unwrap_or(1.0);
                if weight.is_nan() || weight <= 0.0 {
                    return Err(MeasureError::InvalidWeight {
                        from: format!("{:?}", v),
                        to: format!("{:?}", u),
                        weight,
                    });
                }
                if weight < dist[i * n + j] {
                    dist[i * n + j] = weight;
                    if !directed {
                        dist[j * n + i] = weight;
                    }
                }
            }
        }

        // Floyd–Warshall relaxation, intermediate vertex outermost
        for k in 0..n {
            for i in 0..n {
                let d_ik = dist[i * n + k];
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let candidate = d_ik + dist[k * n + j];
                    if candidate < dist[i * n + j] {
                        dist[i * n + j] = candidate;
                    }
                }
            }
        }

        tracing::debug!("Computed all-pairs distances for {} vertices", n);

        Ok(Self {
            vertices,
            index,
            dist,
            directed,
        })
    }

    /// Distance from `from` to `to`, `f64::INFINITY` if unreachable.
    pub fn distance(&self, from: &V, to: &V) -> Result<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Ok(self.distance_at(i, j))
    }

    pub fn is_reachable(&self, from: &V, to: &V) -> Result<bool> {
        Ok(self.distance(from, to)?.is_finite())
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn index_of(&self, vertex: &V) -> Result<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| MeasureError::unknown_vertex(vertex))
    }

    pub(crate) fn distance_at(&self, i: usize, j: usize) -> f64 {
        self.dist[i * self.vertices.len() + j]
    }

    /// Whether the matrix was computed over exactly the vertices of `graph`.
    fn covers<G: GraphView<Vertex = V>>(&self, graph: &G) -> bool {
        self.vertices.len() == graph.vertex_count()
            && self.directed == graph.is_directed()
            && self.vertices.iter().all(|v| graph.contains_vertex(v))
    }
}

/// Fragmentation of the graph the matrix was computed on:
/// `1 − Σ_{i≠j} 1/d(i,j) / (n·(n−1))` over ordered pairs, unreachable pairs
/// contributing 0. On an undirected graph this equals the `i < j` form
/// `1 − 2·Σ_{i<j} 1/d(i,j) / (n·(n−1))`.
///
/// 0 for a complete unweighted graph, 1 when no two vertices are connected.
/// Fewer than two vertices count as fully fragmented.
pub fn fragmentation<V: Clone + Eq + Hash + Debug>(distances: &DistanceMatrix<V>) -> f64 {
    let n = distances.len();
    if n < 2 {
        return 1.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        for j in (0..n).filter(|&j| j != i) {
            let d = distances.distance_at(i, j);
            if d.is_finite() {
                sum += 1.0 / d;
            }
        }
    }
    1.0 - sum / (n * (n - 1)) as f64
}

// ============================================================================
// DistanceCache
// ============================================================================

/// Caller-owned LRU cache of distance matrices keyed by a snapshot id.
///
/// The caller picks the snapshot id and must [`invalidate`](Self::invalidate)
/// it whenever the graph behind it changes.
pub struct DistanceCache<V> {
    entries: LruCache<u64, Arc<DistanceMatrix<V>>>,
}

impl<V: Clone + Eq + Hash + Debug> DistanceCache<V> {
    /// Create a cache holding up to `capacity` matrices (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Return the cached matrix for `snapshot`, computing it from `graph` on a miss.
    ///
    /// A cached matrix whose vertex set differs from `graph` is recomputed.
    /// Edge changes that keep the vertex set cannot be detected: the caller
    /// must use a new snapshot id or [`invalidate`](Self::invalidate) the old one.
    pub fn get_or_compute<G>(&mut self, snapshot: u64, graph: &G) -> Result<Arc<DistanceMatrix<V>>>
    where
        G: GraphView<Vertex = V>,
    {
        if let Some(hit) = self.entries.get(&snapshot) {
            if hit.covers(graph) {
                tracing::debug!("Distance cache hit for snapshot {}", snapshot);
                return Ok(Arc::clone(hit));
            }
            tracing::warn!(
                "Snapshot {} was cached for a different vertex set, recomputing",
                snapshot
            );
        } else {
            tracing::debug!("Distance cache miss for snapshot {}", snapshot);
        }
        let matrix = Arc::new(DistanceMatrix::compute(graph)?);
        self.entries.put(snapshot, Arc::clone(&matrix));
        Ok(matrix)
    }

    pub fn invalidate(&mut self, snapshot: u64) {
        self.entries.pop(&snapshot);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
