//! # Eventide CLI (`evt`)
//!
//! The `evt` binary is the application shell around the recommendation
//! core. It provides commands for listing configured sources, collecting
//! events for a location, and producing ranked recommendations.
//!
//! ## Usage
//!
//! ```bash
//! evt --config ./config/evt.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `evt sources` | List configured event sources and their health |
//! | `evt collect --location <zip>` | Aggregate, dedup, and print events as JSON |
//! | `evt recommend "<query>" --location <zip>` | Collect, index, and print ranked recommendations |

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eventide::aggregate::Aggregator;
use eventide::config::load_config;
use eventide::encoder::create_encoder;
use eventide::sources::{list_sources, SourceRegistry};
use eventide::Recommender;

/// Eventide — an event discovery and recommendation engine.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/evt.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "evt",
    about = "Eventide — discover and rank local events by semantic relevance",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/evt.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured event sources and their health.
    Sources,

    /// Aggregate events from every configured source.
    ///
    /// Deduplicates by the (name, date, venue) identity key and sorts
    /// chronologically. Prints the merged list as JSON.
    Collect {
        /// Postal code to collect events for.
        #[arg(long)]
        location: String,

        /// Comma-separated interest keywords to narrow sources.
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
    },

    /// Produce ranked recommendations for a free-text query.
    ///
    /// Collects events, indexes them in the vector store, and prints the
    /// top-k results with relevance scores, reasoning, and
    /// personalization as JSON.
    Recommend {
        /// The free-text query (e.g. "outdoor concert").
        query: String,

        /// Postal code to collect events for.
        #[arg(long)]
        location: String,

        /// Comma-separated interest keywords to narrow sources.
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,

        /// Number of recommendations to return (defaults to retrieval.k).
        #[arg(short)]
        k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            let registry = SourceRegistry::from_config(&config);
            list_sources(&registry);
        }

        Commands::Collect {
            location,
            interests,
        } => {
            let registry = SourceRegistry::from_config(&config);
            let aggregator = Aggregator::new(registry, config.aggregation.case_insensitive_dedup);
            let events = aggregator.collect(&location, &interests).await;
            if events.is_empty() {
                println!("no events found");
            } else {
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }

        Commands::Recommend {
            query,
            location,
            interests,
            k,
        } => {
            let registry = SourceRegistry::from_config(&config);
            let aggregator = Aggregator::new(registry, config.aggregation.case_insensitive_dedup);
            let events = aggregator.collect(&location, &interests).await;
            if events.is_empty() {
                println!("no matches found");
                return Ok(());
            }

            let encoder = create_encoder(&config.embedding)?;
            let recommender =
                Recommender::new(encoder, Duration::from_secs(config.cache.ttl_secs));
            recommender.index_events(events).await?;

            let k = k.unwrap_or(config.retrieval.k);
            let results = recommender.query(&query, k).await?;
            if results.is_empty() {
                println!("no matches found");
            } else {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }
    }

    Ok(())
}
