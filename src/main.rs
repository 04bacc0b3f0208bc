//! netmeasure CLI
//!
//! Reads a JSON graph document, runs one measure and prints JSON to stdout.
//! Logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use netmeasure::graph::{LinkMethod, MeasureEngine, Objective};
use netmeasure::{io, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "netmeasure")]
#[command(about = "Structural graph measures: key players, link prediction, modularity")]
struct Cli {
    /// YAML config file (defaults to ./netmeasure.yaml)
    #[arg(long, global = true, env = "NETMEASURE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a key-player set of size k
    KeyPlayers {
        /// Graph document (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Size of the key-player set
        #[arg(short)]
        k: usize,

        /// reach (KPP-Pos) or fragmentation (KPP-Neg)
        #[arg(long)]
        objective: Option<Objective>,

        /// RNG seed for a reproducible search
        #[arg(long)]
        seed: Option<u64>,

        /// Independent runs; the fittest wins
        #[arg(long)]
        restarts: Option<usize>,
    },

    /// Rank likely missing links
    PredictLinks {
        /// Graph document (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// common-neighbors or adamic-adar
        #[arg(short, long, default_value = "adamic-adar")]
        method: LinkMethod,

        /// Number of predictions to keep
        #[arg(long)]
        top: Option<usize>,

        /// Only score pairs that are not already adjacent
        #[arg(long)]
        skip_adjacent: bool,
    },

    /// Compute the modularity of a partition
    Modularity {
        /// Graph document (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Partition document: JSON array of vertex-name arrays
        #[arg(short, long)]
        partition: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,netmeasure=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::KeyPlayers {
            graph,
            k,
            objective,
            seed,
            restarts,
        } => {
            let key_player = &mut config.measures.key_player;
            if let Some(objective) = objective {
                key_player.objective = objective;
            }
            if seed.is_some() {
                key_player.seed = seed;
            }
            if let Some(restarts) = restarts {
                key_player.restarts = restarts;
            }
            let graph = io::load_graph(&graph)?;
            let mut engine = MeasureEngine::new(config.measures);
            let result = engine.key_players(0, &graph, k)?;
            serde_json::to_string_pretty(&result)?
        }
        Commands::PredictLinks {
            graph,
            method,
            top,
            skip_adjacent,
        } => {
            let link_prediction = &mut config.measures.link_prediction;
            if let Some(top) = top {
                link_prediction.top_k = top;
            }
            if skip_adjacent {
                link_prediction.skip_adjacent = true;
            }
            let graph = io::load_graph(&graph)?;
            let engine = MeasureEngine::new(config.measures);
            let predictions = engine.predict_links(&graph, method)?;
            serde_json::to_string_pretty(&predictions)?
        }
        Commands::Modularity { graph, partition } => {
            let graph = io::load_graph(&graph)?;
            let partition = io::load_partition(&partition)?;
            let engine = MeasureEngine::new(config.measures);
            let q = engine.modularity(&graph, &partition)?;
            serde_json::to_string_pretty(&serde_json::json!({
                "modularity": q,
                "clusters": partition.len(),
            }))?
        }
    };

    println!("{}", output);
    Ok(())
}
