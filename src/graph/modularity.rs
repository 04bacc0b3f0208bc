//! Newman modularity of a given vertex partition.
//!
//! `Q = Σ_i (e_ii − a_i²)`, where `e_ij` is the fraction of ordered adjacent
//! vertex pairs running from cluster `i` to cluster `j` and `a_i = Σ_j e_ij`.
//! On an undirected graph every edge yields two ordered pairs, so a partition
//! with no inter-cluster edges has `Σ e_ii = 1`.

use std::collections::HashMap;

use super::error::{MeasureError, Result};
use super::view::GraphView;

/// Compute the modularity `Q` of `partition` on `graph`.
///
/// Clusters must be disjoint and may cover only part of the vertex set;
/// vertices outside every cluster are ignored in the numerator. Fails with
/// [`MeasureError::NoEdges`] on an edgeless graph,
/// [`MeasureError::UnknownVertex`] for a cluster member not in the graph, and
/// [`MeasureError::OverlappingPartition`] for a vertex in two clusters.
pub fn modularity<G: GraphView>(graph: &G, partition: &[Vec<G::Vertex>]) -> Result<f64> {
    if graph.edge_count() == 0 {
        return Err(MeasureError::NoEdges);
    }

    let mut cluster_of: HashMap<&G::Vertex, usize> = HashMap::new();
    for (ci, cluster) in partition.iter().enumerate() {
        for v in cluster {
            if !graph.contains_vertex(v) {
                return Err(MeasureError::unknown_vertex(v));
            }
            if let Some(previous) = cluster_of.insert(v, ci) {
                if previous != ci {
                    return Err(MeasureError::OverlappingPartition {
                        vertex: format!("{:?}", v),
                    });
                }
            }
        }
    }

    let c = partition.len();
    let mut counts = vec![0usize; c * c];
    let mut total = 0usize;
    for v in graph.vertices() {
        let from = cluster_of.get(&v).copied();
        for u in graph.neighbors(&v) {
            total += 1;
            if let (Some(i), Some(j)) = (from, cluster_of.get(&u).copied()) {
                counts[i * c + j] += 1;
            }
        }
    }
    if total == 0 {
        return Err(MeasureError::NoEdges);
    }

    let total = total as f64;
    let q = (0..c)
        .map(|i| {
            let e_ii = counts[i * c + i] as f64 / total;
            let a_i = (0..c).map(|j| counts[i * c + j]).sum::<usize>() as f64 / total;
            e_ii - a_i * a_i
        })
        .sum();

    tracing::debug!("Modularity of {} clusters: {:.6}", c, q);
    Ok(q)
}

// ============================================================================
// Tests
// ============================================================================
