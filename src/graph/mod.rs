//! Graph measures.
//!
//! Structural measures over any graph exposed through [`GraphView`]:
//!
//! - **Distances** — all-pairs shortest paths (Floyd–Warshall) and fragmentation
//! - **Key players** — greedy swap search for KPP-Pos (reach) and KPP-Neg (fragmentation)
//! - **Link prediction** — common neighbors and Adamic–Adar, ranked by [`BoundedTopK`]
//! - **Modularity** — Newman's `Q` for a given partition
//!
//! [`MeasureEngine`] ties them to a [`MeasureConfig`] and caches distance
//! matrices between calls.

pub mod distances;
pub mod engine;
pub mod error;
pub mod keyplayer;
pub mod link_prediction;
pub mod modularity;
pub mod models;
pub mod topk;
pub mod view;

pub use distances::{fragmentation, DistanceCache, DistanceMatrix};
pub use engine::MeasureEngine;
pub use error::{ErrorKind, MeasureError, Result};
pub use keyplayer::{FragmentationFitness, Fitness, KeyPlayerOptimizer, ReachFitness};
pub use link_prediction::{adamic_adar, common_neighbors, LinkPrediction};
pub use modularity::modularity;
pub use models::{
    DegeneratePolicy, KeyPlayerConfig, KeyPlayerResult, LinkMethod, LinkPredictionConfig,
    MeasureConfig, Objective, Prediction, UnorderedPair,
};
pub use topk::{BoundedTopK, RankOrder, Ranked};
pub use view::{GraphView, InducedSubgraph, MeasureGraph};
