//! `eco clusters` — list clusters in the snapshot

use anyhow::{Context, Result};
use optimizer_lib::{AnalysisConfig, ClusterClassification, ClusterInventory};
use tabled::Tabled;

use crate::output::{format_hours, print_warning, OutputFormat};
use crate::snapshot::SnapshotInventory;
use crate::Cli;

/// Row for the cluster listing
#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Class")]
    classification: String,
    #[tabled(rename = "Runtime")]
    runtime: String,
    #[tabled(rename = "Groups")]
    groups: String,
    #[tabled(rename = "Instances")]
    instances: String,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let config = AnalysisConfig::load()?;
    let inventory = SnapshotInventory::new(&cli.data_dir, &config)
        .context("Failed to open cluster snapshot")?;
    let clusters = inventory.list_clusters().await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&clusters)?);
        }
        OutputFormat::Table => {
            if clusters.is_empty() {
                print_warning("No clusters found in snapshot");
                return Ok(());
            }

            let rows: Vec<ClusterRow> = clusters
                .iter()
                .map(|c| ClusterRow {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    state: c.state.clone(),
                    classification: match c.classification {
                        ClusterClassification::Transient => "transient".to_string(),
                        ClusterClassification::LongRunning => "long-running".to_string(),
                    },
                    runtime: format_hours(c.runtime_hours),
                    groups: c.instance_groups.len().to_string(),
                    instances: c.running_instances().to_string(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} clusters", clusters.len());
        }
    }

    Ok(())
}
