//! `eco analyze` — run the sizing analysis over a snapshot

use anyhow::{Context, Result};
use optimizer_lib::{AnalysisConfig, AnalysisHistory, Analyzer, ClusterAnalysis};
use tabled::Tabled;

use crate::output::{
    color_peak_type, color_verdict, format_percent, print_info, print_warning, OutputFormat,
};
use crate::snapshot::{SnapshotInventory, SnapshotMetrics};
use crate::Cli;

/// Row for the per-group verdict table
#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Type")]
    instance_type: String,
    #[tabled(rename = "Instances")]
    instances: String,
    #[tabled(rename = "CPU Avg")]
    cpu_avg: String,
    #[tabled(rename = "CPU Peak")]
    cpu_peak: String,
    #[tabled(rename = "Peak Kind")]
    peak_kind: String,
    #[tabled(rename = "CPU Verdict")]
    cpu_verdict: String,
    #[tabled(rename = "Mem Verdict")]
    mem_verdict: String,
}

pub async fn run(cli: &Cli, cluster_id: Option<&str>, no_record: bool) -> Result<()> {
    let config = AnalysisConfig::load()?;
    let inventory = SnapshotInventory::new(&cli.data_dir, &config)
        .context("Failed to open cluster snapshot")?;
    let metrics = SnapshotMetrics::new(&cli.data_dir);
    let analyzer = Analyzer::new(inventory, metrics, config);

    let analyses = match cluster_id {
        Some(id) => vec![analyzer.analyze_cluster_id(id).await?],
        None => analyzer.analyze_all().await?,
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analyses)?);
        }
        OutputFormat::Table => render_table(&analyses),
    }

    if !no_record {
        let mut history = AnalysisHistory::load(cli.history_path())?;
        history.append(analyses)?;
    }

    Ok(())
}

fn render_table(analyses: &[ClusterAnalysis]) {
    let rows: Vec<GroupRow> = analyses
        .iter()
        .flat_map(|analysis| {
            analysis.groups.iter().map(move |ga| GroupRow {
                cluster: analysis.cluster_name.clone(),
                group: ga.group.name.clone(),
                instance_type: ga.group.instance_type.clone(),
                instances: format!(
                    "{}/{}",
                    ga.metrics.instances_with_metrics, ga.metrics.instance_count
                ),
                cpu_avg: format_percent(ga.metrics.cpu.average),
                cpu_peak: format_percent(ga.metrics.cpu.effective_peak),
                peak_kind: color_peak_type(ga.metrics.cpu.peak_type),
                cpu_verdict: color_verdict(ga.cpu_recommendation.as_ref().map(|r| r.verdict)),
                mem_verdict: color_verdict(ga.memory_recommendation.as_ref().map(|r| r.verdict)),
            })
        })
        .collect();

    if rows.is_empty() {
        print_warning("No instance groups found");
        return;
    }

    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);

    let groups: usize = analyses.iter().map(|a| a.groups.len()).sum();
    print_info(&format!(
        "Analyzed {} clusters, {} instance groups",
        analyses.len(),
        groups
    ));
}
