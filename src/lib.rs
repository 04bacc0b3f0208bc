//! netmeasure: structural measures for graphs.
//!
//! - All-pairs shortest-path distances and fragmentation
//! - Key-player sets (KPP-Pos reach, KPP-Neg fragmentation)
//! - Link prediction (common neighbors, Adamic–Adar) with bounded top-k ranking
//! - Newman modularity of a partition

pub mod graph;
pub mod io;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use graph::MeasureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// YAML config (deserialization target)
// ============================================================================

/// Top-level YAML configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlConfig {
    pub measures: MeasureConfig,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub measures: MeasureConfig,
    /// File the YAML layer was read from, if any
    pub source: Option<PathBuf>,
}

impl Config {
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "netmeasure.yaml" in CWD.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        Self::from_yaml_and_lookup(yaml_path, |key| std::env::var(key).ok())
    }

    /// Same as [`from_yaml_and_env`](Self::from_yaml_and_env) with a custom
    /// variable lookup.
    pub fn from_yaml_and_lookup<F>(yaml_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (yaml, source) = Self::load_yaml(yaml_path);
        let mut measures = yaml.measures;

        if let Some(seed) = parse_var(&lookup, "NETMEASURE_SEED") {
            measures.key_player.seed = Some(seed);
        }
        if let Some(top_k) = parse_var(&lookup, "NETMEASURE_TOP_K") {
            measures.link_prediction.top_k = top_k;
        }
        if let Some(max_iterations) = parse_var(&lookup, "NETMEASURE_MAX_ITERATIONS") {
            measures.key_player.max_iterations = max_iterations;
        }
        if let Some(raw) = lookup("NETMEASURE_OBJECTIVE") {
            match raw.parse() {
                Ok(objective) => measures.key_player.objective = objective,
                Err(e) => tracing::warn!("Ignoring NETMEASURE_OBJECTIVE: {}", e),
            }
        }

        Ok(Self { measures, source })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> (YamlConfig, Option<PathBuf>) {
        let default_path = Path::new("netmeasure.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    (config, Some(path.to_path_buf()))
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    (YamlConfig::default(), None)
                }
            },
            Err(_) => {
                tracing::debug!("No config file at {}, using env vars / defaults", path.display());
                (YamlConfig::default(), None)
            }
        }
    }
}

/// Parse an env var, warning about and ignoring unparseable values.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
