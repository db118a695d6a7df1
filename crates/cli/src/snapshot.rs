//! Snapshot-backed inventory and metrics providers
//!
//! Reads a directory exported from the cloud APIs:
//! - `clusters.json` — raw cluster records with their instance groups
//! - `metrics/<instance-id>-cpu.json` / `-mem.json` — per-bucket sample
//!   dumps carrying any subset of the average/maximum/minimum statistics
//!
//! Classification and runtime are derived at read time from the analysis
//! configuration rather than trusted from the export.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use optimizer_lib::{
    runtime_hours, AnalysisConfig, ClusterClassifier, ClusterInfo, ClusterInventory,
    InstanceGroup, MetricKind, MetricsProvider, ProviderError, Statistic, UtilizationSample,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cluster record as stored in `clusters.json`
#[derive(Debug, Clone, Deserialize)]
struct ClusterRecord {
    id: String,
    name: String,
    #[serde(default = "default_state")]
    state: String,
    created_at: DateTime<Utc>,
    instance_groups: Vec<InstanceGroup>,
    #[serde(default)]
    normalized_instance_hours: u64,
    #[serde(default)]
    release_label: String,
    #[serde(default)]
    applications: Vec<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

fn default_state() -> String {
    "RUNNING".to_string()
}

/// Inventory provider reading `clusters.json`
pub struct SnapshotInventory {
    path: PathBuf,
    classifier: ClusterClassifier,
}

impl SnapshotInventory {
    pub fn new(data_dir: &Path, config: &AnalysisConfig) -> anyhow::Result<Self> {
        Ok(Self {
            path: data_dir.join("clusters.json"),
            classifier: ClusterClassifier::new(config)?,
        })
    }

    fn load_records(&self) -> Result<Vec<ClusterRecord>, ProviderError> {
        if !self.path.exists() {
            return Err(ProviderError::NotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn to_info(&self, record: ClusterRecord, now: DateTime<Utc>) -> ClusterInfo {
        let runtime = runtime_hours(record.created_at, now);
        let classification = self.classifier.classify(&record.name, runtime);

        ClusterInfo {
            id: record.id,
            name: record.name,
            state: record.state,
            created_at: record.created_at,
            runtime_hours: runtime,
            classification,
            instance_groups: record.instance_groups,
            normalized_instance_hours: record.normalized_instance_hours,
            release_label: record.release_label,
            applications: record.applications,
            tags: record.tags,
        }
    }
}

#[async_trait]
impl ClusterInventory for SnapshotInventory {
    async fn list_clusters(&self) -> Result<Vec<ClusterInfo>, ProviderError> {
        let now = Utc::now();
        Ok(self
            .load_records()?
            .into_iter()
            .map(|r| self.to_info(r, now))
            .collect())
    }

    async fn cluster(&self, cluster_id: &str) -> Result<ClusterInfo, ProviderError> {
        let now = Utc::now();
        self.load_records()?
            .into_iter()
            .find(|r| r.id == cluster_id)
            .map(|r| self.to_info(r, now))
            .ok_or_else(|| ProviderError::NotFound(cluster_id.to_string()))
    }
}

/// One exported sample bucket; any statistic may be absent
#[derive(Debug, Clone, Deserialize)]
struct SampleRecord {
    timestamp: DateTime<Utc>,
    #[serde(default)]
    average: Option<f64>,
    #[serde(default)]
    maximum: Option<f64>,
    #[serde(default)]
    minimum: Option<f64>,
}

/// Metrics provider reading per-instance sample dumps
pub struct SnapshotMetrics {
    dir: PathBuf,
}

impl SnapshotMetrics {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("metrics"),
        }
    }

    fn file_for(&self, instance_id: &str, kind: MetricKind) -> PathBuf {
        let suffix = match kind {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "mem",
        };
        self.dir.join(format!("{instance_id}-{suffix}.json"))
    }
}

#[async_trait]
impl MetricsProvider for SnapshotMetrics {
    async fn fetch_samples(
        &self,
        instance_id: &str,
        kind: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        _period_seconds: u32,
    ) -> Result<Vec<UtilizationSample>, ProviderError> {
        let path = self.file_for(instance_id, kind);
        // instances without an export (e.g. no agent installed) have no data
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let records: Vec<SampleRecord> = serde_json::from_str(&content)?;

        let mut samples = Vec::new();
        for record in records {
            if record.timestamp < start || record.timestamp > end {
                continue;
            }
            for (value, statistic) in [
                (record.average, Statistic::Average),
                (record.maximum, Statistic::Maximum),
                (record.minimum, Statistic::Minimum),
            ] {
                if let Some(value) = value {
                    samples.push(UtilizationSample {
                        timestamp: record.timestamp,
                        value,
                        statistic,
                    });
                }
            }
        }
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}
