//! Graph measure data models.
//!
//! ## Output types
//! - [`UnorderedPair`] — vertex pair whose equality ignores endpoint order
//! - [`Prediction`] — a scored vertex pair produced by a link predictor
//! - [`KeyPlayerResult`] — the vertex set found by the key-player search
//!
//! ## Configuration
//! - [`MeasureConfig`] — tuning parameters for all measures
//! - [`KeyPlayerConfig`] / [`LinkPredictionConfig`] — per-family sections

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Output types
// ============================================================================

/// Vertex pair with `(u, v) == (v, u)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnorderedPair<V> {
    pub first: V,
    pub second: V,
}

impl<V> UnorderedPair<V> {
    pub fn new(first: V, second: V) -> Self {
        Self { first, second }
    }
}

impl<V: PartialEq> PartialEq for UnorderedPair<V> {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl<V: Eq> Eq for UnorderedPair<V> {}

impl<V: Hash> Hash for UnorderedPair<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let a = element_hash(&self.first);
        let b = element_hash(&self.second);
        state.write_u64(a.min(b));
        state.write_u64(a.max(b));
    }
}

fn element_hash<V: Hash>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A predicted (missing) link with its score and an optional payload.
///
/// Ranking uses `score` only; identity is the unordered vertex pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction<V, P = ()> {
    pub pair: UnorderedPair<V>,
    pub score: f64,
    pub payload: Option<P>,
}

impl<V, P> Prediction<V, P> {
    pub fn new(first: V, second: V, score: f64) -> Self {
        Self {
            pair: UnorderedPair::new(first, second),
            score,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Which key-player fitness the optimizer maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// KPP-Pos: the set reaches the rest of the graph closely.
    Reach,
    /// KPP-Neg: removing the set fragments the rest of the graph.
    Fragmentation,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reach => write!(f, "reach"),
            Self::Fragmentation => write!(f, "fragmentation"),
        }
    }
}

impl std::str::FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reach" | "kpp-pos" => Ok(Self::Reach),
            "fragmentation" | "kpp-neg" => Ok(Self::Fragmentation),
            other => Err(format!("unknown key player objective: {}", other)),
        }
    }
}

/// Link-prediction scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMethod {
    CommonNeighbors,
    AdamicAdar,
}

impl fmt::Display for LinkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommonNeighbors => write!(f, "common-neighbors"),
            Self::AdamicAdar => write!(f, "adamic-adar"),
        }
    }
}

impl std::str::FromStr for LinkMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "common-neighbors" | "cn" => Ok(Self::CommonNeighbors),
            "adamic-adar" | "aa" => Ok(Self::AdamicAdar),
            other => Err(format!("unknown link prediction method: {}", other)),
        }
    }
}

/// Result of a key-player search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPlayerResult<V> {
    /// The key player set (always exactly `k` distinct vertices)
    pub members: Vec<V>,
    /// Fitness of `members` under `objective`
    pub fitness: f64,
    /// Swaps applied by the winning run
    pub iterations: usize,
    /// `None` when a custom fitness drove the search
    pub objective: Option<Objective>,
}

// ============================================================================
// Configuration
// ============================================================================

/// How Adamic–Adar treats a common neighbor of degree 1, whose `1/ln(1)`
/// contribution is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Drop the contribution.
    Skip,
    /// The pair's score becomes `f64::INFINITY`.
    Infinite,
    /// Fail with `MeasureError::DegenerateCommonNeighbor`.
    Reject,
}

/// Key-player search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyPlayerConfig {
    /// Fitness to maximize (default: fragmentation)
    pub objective: Objective,
    /// Safety cap on applied swaps per run (default: 1000)
    pub max_iterations: usize,
    /// Independent runs; the fittest result wins (default: 1)
    pub restarts: usize,
    /// Seed for the random initial set. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for KeyPlayerConfig {
    fn default() -> Self {
        Self {
            objective: Objective::Fragmentation,
            max_iterations: 1000,
            restarts: 1,
            seed: None,
        }
    }
}

/// Link-prediction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPredictionConfig {
    /// Number of predictions kept (default: 10)
    pub top_k: usize,
    /// Skip pairs that are already adjacent (default: false)
    pub skip_adjacent: bool,
    /// Adamic–Adar degree-1 handling (default: skip)
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for LinkPredictionConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            skip_adjacent: false,
            degenerate_policy: DegeneratePolicy::Skip,
        }
    }
}

/// Tuning parameters for all graph measures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub key_player: KeyPlayerConfig,
    pub link_prediction: LinkPredictionConfig,
    /// Distance matrices kept by the engine's cache (default: 8)
    pub distance_cache_capacity: usize,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            key_player: KeyPlayerConfig::default(),
            link_prediction: LinkPredictionConfig::default(),
            distance_cache_capacity: 8,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
