//! `eco history` — show recorded analysis runs

use anyhow::Result;
use optimizer_lib::{AnalysisHistory, AnalysisRun, SizingVerdict};
use tabled::Tabled;

use crate::output::{format_timestamp, print_warning, OutputFormat};
use crate::Cli;

/// Row for the history listing
#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Recorded")]
    recorded_at: String,
    #[tabled(rename = "Clusters")]
    clusters: String,
    #[tabled(rename = "Groups")]
    groups: String,
    #[tabled(rename = "Undersized")]
    undersized: String,
    #[tabled(rename = "Oversized")]
    oversized: String,
}

pub fn run(cli: &Cli, limit: usize) -> Result<()> {
    let history = AnalysisHistory::load(cli.history_path())?;
    let runs: Vec<&AnalysisRun> = history.runs().iter().rev().take(limit).collect();

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }
        OutputFormat::Table => {
            if runs.is_empty() {
                print_warning("No recorded analysis runs");
                return Ok(());
            }

            let rows: Vec<RunRow> = runs.iter().map(|run| summarize_run(run)).collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

fn summarize_run(run: &AnalysisRun) -> RunRow {
    let mut groups = 0usize;
    let mut undersized = 0usize;
    let mut oversized = 0usize;

    for cluster in &run.clusters {
        for group in &cluster.groups {
            groups += 1;
            let verdicts = [
                group.cpu_recommendation.as_ref().map(|r| r.verdict),
                group.memory_recommendation.as_ref().map(|r| r.verdict),
            ];
            if verdicts.contains(&Some(SizingVerdict::Undersized)) {
                undersized += 1;
            }
            if verdicts.iter().any(|v| {
                matches!(
                    v,
                    Some(SizingVerdict::HeavilyOversized | SizingVerdict::ModeratelyOversized)
                )
            }) {
                oversized += 1;
            }
        }
    }

    RunRow {
        recorded_at: format_timestamp(&run.recorded_at),
        clusters: run.clusters.len().to_string(),
        groups: groups.to_string(),
        undersized: undersized.to_string(),
        oversized: oversized.to_string(),
    }
}
