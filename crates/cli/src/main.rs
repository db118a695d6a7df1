//! EMR Cost Optimizer CLI
//!
//! A command-line tool that inspects cluster inventory and utilization
//! snapshots, classifies each instance group's compute as over- or
//! under-provisioned, and records the verdicts over time.

mod commands;
mod output;
mod snapshot;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// EMR Cost Optimizer CLI
#[derive(Parser)]
#[command(name = "eco")]
#[command(author, version, about = "CLI for the EMR cost optimizer", long_about = None)]
pub struct Cli {
    /// Directory holding the inventory/metrics snapshot
    #[arg(long, env = "ECO_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Analysis history file (defaults to <data-dir>/analysis_history.json)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze cluster utilization and produce sizing verdicts
    Analyze {
        /// Analyze a single cluster by ID
        #[arg(long)]
        cluster: Option<String>,

        /// Skip recording the run in the history file
        #[arg(long)]
        no_record: bool,
    },

    /// List clusters in the snapshot with their classification
    Clusters,

    /// Show recorded analysis runs
    History {
        /// Number of runs to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

impl Cli {
    /// Resolved history file path
    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("analysis_history.json"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Analyze { cluster, no_record } => {
            commands::analyze::run(&cli, cluster.as_deref(), *no_record).await
        }
        Commands::Clusters => commands::clusters::run(&cli).await,
        Commands::History { limit } => commands::history::run(&cli, *limit),
    }
}
