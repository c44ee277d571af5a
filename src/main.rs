//! ct-dedup - operator tool for SCT dedup stores

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ct_dedup::config::Config;
use ct_dedup::{DedupStore, LeafDedupInfo};

#[derive(Parser, Debug)]
#[command(name = "ct-dedup")]
#[command(about = "Inspect and maintain a CT log SCT dedup store")]
struct Args {
    /// Path to the dedup database
    #[arg(long, env = "CT_DEDUP_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "CT_DEDUP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the store if missing and check its buckets
    Init,

    /// Print the contiguous size (first index to synchronise from)
    Size,

    /// Look up the SCT recorded for a leaf
    Get {
        /// Leaf ID, hex encoded
        leaf_id: String,
    },

    /// Record a leaf index (only lowers an existing index)
    Add {
        /// Leaf ID, hex encoded
        leaf_id: String,
        index: u64,
        /// SCT timestamp, milliseconds since epoch
        timestamp: u64,
    },

    /// Print store statistics
    Stats,
}

fn format_timestamp(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "out of range".to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(path) = args.database {
        config.store.path = path;
    }

    let store = DedupStore::with_config(config.store.clone())
        .with_context(|| format!("opening dedup store {}", config.store.path.display()))?;

    match args.command {
        Command::Init => {
            println!("{}: ready, size {}", store.path().display(), store.log_size()?);
        }
        Command::Size => {
            println!("{}", store.log_size()?);
        }
        Command::Get { leaf_id } => {
            let leaf_id = hex::decode(&leaf_id).context("leaf ID must be hex")?;
            match store.get(&leaf_id)? {
                Some(info) => println!(
                    "index={} timestamp={} ({})",
                    info.idx,
                    info.timestamp,
                    format_timestamp(info.timestamp)
                ),
                None => {
                    println!("not found");
                    std::process::exit(1);
                }
            }
        }
        Command::Add {
            leaf_id,
            index,
            timestamp,
        } => {
            let leaf_id = hex::decode(&leaf_id).context("leaf ID must be hex")?;
            store.add(&[LeafDedupInfo::new(leaf_id.clone(), index, timestamp)])?;
            let stored = store
                .get(&leaf_id)?
                .context("record missing after add")?;
            tracing::info!(index = stored.idx, "Leaf recorded");
            println!(
                "index={} timestamp={} ({})",
                stored.idx,
                stored.timestamp,
                format_timestamp(stored.timestamp)
            );
        }
        Command::Stats => {
            let stats = store.stats()?;
            println!("leaves:    {}", stats.leaf_count);
            println!("log size:  {}", stats.log_size);
            println!("file size: {} bytes", stats.file_size);
        }
    }

    store.close()?;
    Ok(())
}
