//! Measure engine: single entry point for the CLI and other consumers.
//!
//! Owns a [`MeasureConfig`] and a [`DistanceCache`], and dispatches to the
//! three measure families:
//!
//! 1. **Key players**: seeded RNG from config, reach distances served from the cache
//! 2. **Link prediction**: common neighbors or Adamic–Adar, best first
//! 3. **Modularity**: `Q` of a caller-supplied partition

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;
use std::hash::Hash;

use super::distances::DistanceCache;
use super::error::Result;
use super::keyplayer::{KeyPlayerOptimizer, ReachFitness};
use super::link_prediction::{adamic_adar, common_neighbors, LinkPrediction};
use super::modularity::modularity;
use super::models::{KeyPlayerResult, LinkMethod, MeasureConfig, Objective};
use super::view::GraphView;

/// Measure engine for graphs whose vertices are `V`.
///
/// Not shareable across threads while a call is in flight: key-player
/// searches take `&mut self` to update the distance cache.
pub struct MeasureEngine<V> {
    config: MeasureConfig,
    distances: DistanceCache<V>,
}

impl<V: Clone + Eq + Hash + Debug> MeasureEngine<V> {
    pub fn new(config: MeasureConfig) -> Self {
        let distances = DistanceCache::new(config.distance_cache_capacity);
        Self { config, distances }
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Find a key-player set of size `k`.
    ///
    /// The RNG is seeded from `key_player.seed`, or from OS entropy when unset.
    ///
    /// `snapshot` identifies the graph state for the distance cache. A cached
    /// matrix is reused only while its vertex set matches `graph`; after an
    /// edge change pass a new id or call [`invalidate`](Self::invalidate),
    /// otherwise reach is scored on stale distances.
    pub fn key_players<G>(&mut self, snapshot: u64, graph: &G, k: usize) -> Result<KeyPlayerResult<V>>
    where
        G: GraphView<Vertex = V>,
    {
        let mut rng = match self.config.key_player.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.key_players_with_rng(snapshot, graph, k, &mut rng)
    }

    /// Like [`key_players`](Self::key_players) with a caller-supplied RNG.
    pub fn key_players_with_rng<G, R>(
        &mut self,
        snapshot: u64,
        graph: &G,
        k: usize,
        rng: &mut R,
    ) -> Result<KeyPlayerResult<V>>
    where
        G: GraphView<Vertex = V>,
        R: Rng + ?Sized,
    {
        let optimizer = KeyPlayerOptimizer::new(graph, self.config.key_player.clone());
        optimizer.validate(k)?;
        match self.config.key_player.objective {
            Objective::Reach => {
                let matrix = self.distances.get_or_compute(snapshot, graph)?;
                optimizer.run_with(k, &ReachFitness::new(matrix), rng)
            }
            Objective::Fragmentation => optimizer.run(k, rng),
        }
    }

    /// Top `link_prediction.top_k` predicted links, best first.
    pub fn predict_links<G>(&self, graph: &G, method: LinkMethod) -> Result<Vec<LinkPrediction<V>>>
    where
        G: GraphView<Vertex = V>,
    {
        let config = &self.config.link_prediction;
        let top = match method {
            LinkMethod::CommonNeighbors => common_neighbors(graph, config)?,
            LinkMethod::AdamicAdar => adamic_adar(graph, config)?,
        };
        tracing::info!(
            "Link prediction ({}) on {} vertices: {} predictions",
            method,
            graph.vertex_count(),
            top.len()
        );
        Ok(top.into_sorted_vec())
    }

    pub fn modularity<G>(&self, graph: &G, partition: &[Vec<V>]) -> Result<f64>
    where
        G: GraphView<Vertex = V>,
    {
        modularity(graph, partition)
    }

    /// Drop the cached distances for `snapshot` after its graph changed.
    pub fn invalidate(&mut self, snapshot: u64) {
        self.distances.invalidate(snapshot);
    }

    pub fn cached_snapshots(&self) -> usize {
        self.distances.len()
    }
}

impl<V: Clone + Eq + Hash + Debug> Default for MeasureEngine<V> {
    fn default() -> Self {
        Self::new(MeasureConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::error::MeasureError;
    use crate::test_helpers::{disjoint_cliques, path_graph, star_graph};

    fn reach_config(seed: u64) -> MeasureConfig {
        let mut config = MeasureConfig::default();
        config.key_player.objective = Objective::Reach;
        config.key_player.seed = Some(seed);
        config
    }

    #[test]
    fn test_key_players_reach_uses_cache() {
        let g = star_graph(4);
        let mut engine = MeasureEngine::new(reach_config(3));
        let first = engine.key_players(1, &g, 1).unwrap();
        assert_eq!(first.members, vec!["center".to_string()]);
        assert!((first.fitness - 1.0).abs() < 1e-12);
        assert_eq!(first.objective, Some(Objective::Reach));
        assert_eq!(engine.cached_snapshots(), 1);

        engine.key_players(1, &g, 1).unwrap();
        assert_eq!(engine.cached_snapshots(), 1);

        engine.invalidate(1);
        assert_eq!(engine.cached_snapshots(), 0);
    }

    #[test]
    fn test_key_players_reused_snapshot_with_new_vertices() {
        let mut engine = MeasureEngine::new(reach_config(3));
        engine.key_players(1, &path_graph(3), 1).unwrap();

        let star = star_graph(4);
        let result = engine.key_players(1, &star, 1).unwrap();
        assert_eq!(result.members, vec!["center".to_string()]);
        assert!((result.fitness - 1.0).abs() < 1e-12);
        assert_eq!(engine.cached_snapshots(), 1);
    }

    #[test]
    fn test_key_players_rejects_before_computing() {
        let g = path_graph(3);
        let mut engine = MeasureEngine::new(reach_config(0));
        let err = engine.key_players(1, &g, 3).unwrap_err();
        assert_eq!(
            err,
            MeasureError::KeySetTooLarge {
                k: 3,
                vertex_count: 3
            }
        );
        assert_eq!(engine.cached_snapshots(), 0);
    }

    #[test]
    fn test_key_players_seeded_is_deterministic() {
        let g = disjoint_cliques(3, 4);
        let mut config = MeasureConfig::default();
        config.key_player.seed = Some(42);
        let a = MeasureEngine::new(config.clone()).key_players(0, &g, 2).unwrap();
        let b = MeasureEngine::new(config).key_players(0, &g, 2).unwrap();
        assert_eq!(a.members, b.members);
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.objective, Some(Objective::Fragmentation));
    }

    #[test]
    fn test_predict_links_best_first() {
        let g = path_graph(5);
        let mut config = MeasureConfig::default();
        config.link_prediction.top_k = 3;
        let engine = MeasureEngine::new(config);
        let predictions = engine.predict_links(&g, LinkMethod::CommonNeighbors).unwrap();
        assert_eq!(predictions.len(), 3);
        assert!(predictions.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(predictions[0].score, 1.0);
    }

    #[test]
    fn test_modularity_passthrough() {
        let g = disjoint_cliques(2, 3);
        let engine = MeasureEngine::default();
        let partition: Vec<Vec<String>> = (0..2)
            .map(|c| (0..3).map(|i| format!("c{}_{}", c, i)).collect())
            .collect();
        let q = engine.modularity(&g, &partition).unwrap();
        assert!((q - 0.5).abs() < 1e-12);
    }
}
