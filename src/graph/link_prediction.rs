//! Link prediction from shared neighborhoods.
//!
//! Both scorers rank every vertex pair (self-pairs excluded) and keep the
//! best `top_k` in a [`BoundedTopK`]:
//! - **Common neighbors** — `|N(u) ∩ N(v)|`
//! - **Adamic–Adar** — `Σ_{z ∈ N(u) ∩ N(v)} 1 / ln(deg(z))`
//!
//! Adjacent pairs are scored too unless `skip_adjacent` is set. On a directed
//! graph, `N(v)` is the successor set. Each prediction carries its common
//! neighbors as payload.

use std::collections::{HashMap, HashSet};

use super::error::{MeasureError, Result};
use super::models::{DegeneratePolicy, LinkPredictionConfig, Prediction};
use super::topk::BoundedTopK;
use super::view::GraphView;

/// Prediction whose payload lists the common neighbors of the pair.
pub type LinkPrediction<V> = Prediction<V, Vec<V>>;

/// Neighbor lists (enumeration order) and lookup sets, self excluded.
struct Neighborhoods<V> {
    vertices: Vec<V>,
    lists: Vec<Vec<V>>,
    sets: Vec<HashSet<V>>,
    degree: HashMap<V, usize>,
}

impl<V: Clone + Eq + std::hash::Hash> Neighborhoods<V> {
    fn build<G: GraphView<Vertex = V>>(graph: &G) -> Self {
        let vertices = graph.vertices();
        let mut lists = Vec::with_capacity(vertices.len());
        let mut sets = Vec::with_capacity(vertices.len());
        let mut degree = HashMap::with_capacity(vertices.len());
        for v in &vertices {
            let list: Vec<V> = graph.neighbors(v).into_iter().filter(|u| u != v).collect();
            degree.insert(v.clone(), list.len());
            sets.push(list.iter().cloned().collect());
            lists.push(list);
        }
        Self {
            vertices,
            lists,
            sets,
            degree,
        }
    }

    fn common(&self, i: usize, j: usize) -> Vec<V> {
        self.lists[i]
            .iter()
            .filter(|z| self.sets[j].contains(*z))
            .cloned()
            .collect()
    }
}

/// Score every unordered pair with `score` and keep the best `config.top_k`.
fn rank_pairs<G, F>(
    graph: &G,
    config: &LinkPredictionConfig,
    mut score: F,
) -> Result<BoundedTopK<LinkPrediction<G::Vertex>>>
where
    G: GraphView,
    F: FnMut(&[G::Vertex], &HashMap<G::Vertex, usize>) -> Result<f64>,
{
    let hoods = Neighborhoods::build(graph);
    let n = hoods.vertices.len();
    let mut top = BoundedTopK::highest(config.top_k);
    let mut scored = 0usize;

    for i in 0..n {
        for j in (i + 1)..n {
            let (u, v) = (&hoods.vertices[i], &hoods.vertices[j]);
            if config.skip_adjacent && (graph.has_edge(u, v) || graph.has_edge(v, u)) {
                continue;
            }
            let common = hoods.common(i, j);
            let value = score(&common, &hoods.degree)?;
            top.insert(Prediction::new(u.clone(), v.clone(), value).with_payload(common));
            scored += 1;
        }
    }

    tracing::debug!(
        "Scored {} vertex pairs, kept {} predictions",
        scored,
        top.len()
    );
    Ok(top)
}

/// Rank vertex pairs by their number of common neighbors.
pub fn common_neighbors<G: GraphView>(
    graph: &G,
    config: &LinkPredictionConfig,
) -> Result<BoundedTopK<LinkPrediction<G::Vertex>>> {
    rank_pairs(graph, config, |common, _| Ok(common.len() as f64))
}

/// Rank vertex pairs by Adamic–Adar score.
///
/// A common neighbor of degree ≤ 1 has no finite `1 / ln(deg)` term; it is
/// handled by `config.degenerate_policy`:
/// [`Skip`](DegeneratePolicy::Skip) drops the term,
/// [`Infinite`](DegeneratePolicy::Infinite) makes the pair's score `+∞`, and
/// [`Reject`](DegeneratePolicy::Reject) fails with
/// [`MeasureError::DegenerateCommonNeighbor`].
pub fn adamic_adar<G: GraphView>(
    graph: &G,
    config: &LinkPredictionConfig,
) -> Result<BoundedTopK<LinkPrediction<G::Vertex>>> {
    let policy = config.degenerate_policy;
    rank_pairs(graph, config, |common, degree| {
        let mut score = 0.0;
        for z in common {
            let d = degree.get(z).copied().unwrap_or(0);
            if d > 1 {
                score += 1.0 / (d as f64).ln();
                continue;
            }
            match policy {
                DegeneratePolicy::Skip => {}
                DegeneratePolicy::Infinite => score = f64::INFINITY,
                DegeneratePolicy::Reject => {
                    return Err(MeasureError::DegenerateCommonNeighbor {
                        vertex: format!("{:?}", z),
                    })
                }
            }
        }
        Ok(score)
    })
}

// ============================================================================
// Tests
// ============================================================================
