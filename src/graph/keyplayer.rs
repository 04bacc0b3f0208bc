//! Key-player sets (Borgatti).
//!
//! Finds a set of `k` vertices that either reaches the rest of the graph as
//! closely as possible ([`ReachFitness`], KPP-Pos) or whose removal leaves
//! the rest as fragmented as possible ([`FragmentationFitness`], KPP-Neg).
//!
//! The search is a greedy swap-based local search:
//!
//! 1. Start from `k` vertices drawn uniformly at random.
//! 2. Score every swap (one member out, one non-member in) and keep the one
//!    with the largest fitness gain, first one wins on ties.
//! 3. Negative best gain: stop. Zero best gain: apply it once, then stop.
//!    Positive gain: apply it and repeat.
//!
//! The zero-gain step in 3 is kept as-is: it decides which of several
//! equally fit sets is returned, so dropping it would change results.

use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

use super::distances::{fragmentation, DistanceMatrix};
use super::error::{MeasureError, Result};
use super::models::{KeyPlayerConfig, KeyPlayerResult, Objective};
use super::view::{GraphView, InducedSubgraph};

// ============================================================================
// Fitness functions
// ============================================================================

/// A key-player objective. Higher is better.
pub trait Fitness<V> {
    fn evaluate(&self, members: &[V]) -> Result<f64>;

    /// Built-in objective this fitness implements, if any.
    fn objective(&self) -> Option<Objective> {
        None
    }
}

/// KPP-Pos: mean of `1 / d(S, v)` over every vertex `v` outside `S`, where
/// `d(S, v)` is the distance from the closest member. Unreachable vertices
/// contribute 0.
pub struct ReachFitness<V> {
    distances: Arc<DistanceMatrix<V>>,
}

impl<V: Clone + Eq + std::hash::Hash + std::fmt::Debug> ReachFitness<V> {
    /// Use a precomputed distance matrix.
    pub fn new(distances: Arc<DistanceMatrix<V>>) -> Self {
        Self { distances }
    }

    pub fn from_graph<G>(graph: &G) -> Result<Self>
    where
        G: GraphView<Vertex = V>,
    {
        Ok(Self::new(Arc::new(DistanceMatrix::compute(graph)?)))
    }
}

impl<V: Clone + Eq + std::hash::Hash + std::fmt::Debug> Fitness<V> for ReachFitness<V> {
    fn evaluate(&self, members: &[V]) -> Result<f64> {
        let dm = &self.distances;
        let member_idx = members
            .iter()
            .map(|m| dm.index_of(m))
            .collect::<Result<Vec<usize>>>()?;
        let in_set: HashSet<usize> = member_idx.iter().copied().collect();

        let outside = dm.len() - in_set.len();
        if outside == 0 {
            return Ok(0.0);
        }

        let mut total = 0.0;
        for v in (0..dm.len()).filter(|v| !in_set.contains(v)) {
            let closest = member_idx
                .iter()
                .map(|&s| dm.distance_at(s, v))
                .fold(f64::INFINITY, f64::min);
            if closest.is_finite() {
                total += 1.0 / closest;
            }
        }
        Ok(total / outside as f64)
    }

    fn objective(&self) -> Option<Objective> {
        Some(Objective::Reach)
    }
}

/// KPP-Neg: fragmentation of the subgraph left after removing `S`.
///
/// Distances are recomputed per evaluation on an [`InducedSubgraph`] view,
/// since removing vertices changes shortest paths.
pub struct FragmentationFitness<'a, G> {
    graph: &'a G,
}

impl<'a, G: GraphView> FragmentationFitness<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }
}

impl<G: GraphView> Fitness<G::Vertex> for FragmentationFitness<'_, G> {
    fn evaluate(&self, members: &[G::Vertex]) -> Result<f64> {
        if let Some(missing) = members.iter().find(|m| !self.graph.contains_vertex(m)) {
            return Err(MeasureError::unknown_vertex(missing));
        }
        let removed: HashSet<G::Vertex> = members.iter().cloned().collect();
        let remainder = InducedSubgraph::new(self.graph, &removed);
        let distances = DistanceMatrix::compute(&remainder)?;
        Ok(fragmentation(&distances))
    }

    fn objective(&self) -> Option<Objective> {
        Some(Objective::Fragmentation)
    }
}

// ============================================================================
// Optimizer
// ============================================================================

/// Outcome of a single local-search run, in vertex positions.
struct RunOutcome {
    members: Vec<usize>,
    fitness: f64,
    iterations: usize,
}

/// Greedy swap search for a key-player set of size `k`.
pub struct KeyPlayerOptimizer<'a, G> {
    graph: &'a G,
    config: KeyPlayerConfig,
}

impl<'a, G: GraphView> KeyPlayerOptimizer<'a, G> {
    pub fn new(graph: &'a G, config: KeyPlayerConfig) -> Self {
        Self { graph, config }
    }

    /// Run the search with the fitness selected by `config.objective`.
    pub fn run<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Result<KeyPlayerResult<G::Vertex>> {
        self.validate(k)?;
        match self.config.objective {
            Objective::Reach => {
                let fitness = ReachFitness::from_graph(self.graph)?;
                self.run_with(k, &fitness, rng)
            }
            Objective::Fragmentation => {
                let fitness = FragmentationFitness::new(self.graph);
                self.run_with(k, &fitness, rng)
            }
        }
    }

    /// Run the search with a caller-supplied fitness.
    ///
    /// Fails with [`MeasureError::KeySetTooLarge`] unless the graph has more
    /// than `k` vertices, and with [`MeasureError::EmptyKeySet`] for `k = 0`.
    pub fn run_with<F, R>(
        &self,
        k: usize,
        fitness: &F,
        rng: &mut R,
    ) -> Result<KeyPlayerResult<G::Vertex>>
    where
        F: Fitness<G::Vertex>,
        R: Rng + ?Sized,
    {
        self.validate(k)?;
        let vertices = self.graph.vertices();
        let restarts = self.config.restarts.max(1);

        let mut best: Option<RunOutcome> = None;
        for run in 0..restarts {
            let outcome = self.search(&vertices, k, fitness, rng)?;
            tracing::debug!(
                "Key player run {}/{}: fitness {:.6} after {} swaps",
                run + 1,
                restarts,
                outcome.fitness,
                outcome.iterations
            );
            if best.as_ref().map_or(true, |b| outcome.fitness > b.fitness) {
                best = Some(outcome);
            }
        }

        let best = best.ok_or(MeasureError::EmptyKeySet)?;
        let objective = fitness.objective();
        tracing::info!(
            "Key player search ({}) on {} vertices, k = {}: fitness {:.6}",
            objective.map_or_else(|| "custom".to_string(), |o| o.to_string()),
            vertices.len(),
            k,
            best.fitness
        );

        Ok(KeyPlayerResult {
            members: best.members.iter().map(|&i| vertices[i].clone()).collect(),
            fitness: best.fitness,
            iterations: best.iterations,
            objective,
        })
    }

    /// Check `0 < k < |V|` without running anything.
    pub fn validate(&self, k: usize) -> Result<()> {
        let vertex_count = self.graph.vertex_count();
        if k == 0 {
            return Err(MeasureError::EmptyKeySet);
        }
        if vertex_count <= k {
            return Err(MeasureError::KeySetTooLarge { k, vertex_count });
        }
        Ok(())
    }

    fn search<F, R>(
        &self,
        vertices: &[G::Vertex],
        k: usize,
        fitness: &F,
        rng: &mut R,
    ) -> Result<RunOutcome>
    where
        F: Fitness<G::Vertex>,
        R: Rng + ?Sized,
    {
        let n = vertices.len();
        let mut set: Vec<usize> = index::sample(rng, n, k).into_vec();
        let chosen: HashSet<usize> = set.iter().copied().collect();
        let mut pool: Vec<usize> = (0..n).filter(|i| !chosen.contains(i)).collect();

        let mut members: Vec<G::Vertex> = set.iter().map(|&i| vertices[i].clone()).collect();
        let mut current = fitness.evaluate(&members)?;
        let mut iterations = 0;

        loop {
            if iterations >= self.config.max_iterations {
                tracing::warn!(
                    "Key player search stopped at the {} swap cap (fitness {:.6})",
                    self.config.max_iterations,
                    current
                );
                break;
            }

            // (member position, pool position, gain, fitness after swap)
            let mut best: Option<(usize, usize, f64, f64)> = None;
            for si in 0..set.len() {
                let outgoing = members[si].clone();
                for (ui, &candidate) in pool.iter().enumerate() {
                    members[si] = vertices[candidate].clone();
                    let value = fitness.evaluate(&members)?;
                    let gain = value - current;
                    if best.map_or(true, |(_, _, best_gain, _)| gain > best_gain) {
                        best = Some((si, ui, gain, value));
                    }
                }
                members[si] = outgoing;
            }

            let Some((si, ui, gain, value)) = best else {
                break;
            };
            if gain < 0.0 {
                break;
            }

            std::mem::swap(&mut set[si], &mut pool[ui]);
            members[si] = vertices[set[si]].clone();
            current = value;
            iterations += 1;
            tracing::debug!(
                "Swap {}: {:?} -> {:?}, gain {:.6}",
                iterations,
                vertices[pool[ui]],
                vertices[set[si]],
                gain
            );

            if gain == 0.0 {
                break;
            }
        }

        Ok(RunOutcome {
            members: set,
            fitness: current,
            iterations,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
