//! JSON graph and partition documents used by the CLI.
//!
//! A graph document looks like:
//!
//! ```json
//! { "directed": false, "vertices": ["a", "b", "c"], "edges": [["a", "b"], ["b", "c", 2.5]] }
//! ```
//!
//! `vertices` is optional and only needed for isolated vertices. A partition
//! document is a JSON array of clusters, each an array of vertex names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::graph::MeasureGraph;

/// An edge as `[from, to]` or `[from, to, weight]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeRecord {
    Weighted(String, String, f64),
    Plain(String, String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    pub fn into_graph(self) -> MeasureGraph<String> {
        let mut graph =
            MeasureGraph::with_capacity(self.directed, self.vertices.len(), self.edges.len());
        for v in self.vertices {
            graph.add_vertex(v);
        }
        for edge in self.edges {
            match edge {
                EdgeRecord::Plain(from, to) => {
                    graph.add_edge(from, to);
                }
                EdgeRecord::Weighted(from, to, weight) => {
                    graph.add_weighted_edge(from, to, weight);
                }
            }
        }
        graph
    }
}

pub fn parse_graph(json: &str) -> Result<MeasureGraph<String>> {
    let doc: GraphDocument = serde_json::from_str(json).context("invalid graph document")?;
    Ok(doc.into_graph())
}

pub fn load_graph(path: &Path) -> Result<MeasureGraph<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph {}", path.display()))?;
    let graph = parse_graph(&contents).with_context(|| format!("in {}", path.display()))?;
    tracing::debug!("Loaded graph from {}", path.display());
    Ok(graph)
}

pub fn load_partition(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read partition {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid partition document in {}", path.display()))
}
