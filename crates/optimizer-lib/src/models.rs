//! Core data models for cluster right-sizing analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistic kind attached to a utilization sample bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    Average,
    Maximum,
    Minimum,
}

/// One utilization datapoint as returned by the metrics provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub statistic: Statistic,
}

/// How the effective peak was classified by the selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakType {
    /// The P95 level was held long enough to size for it
    Sustained,
    /// Utilization spent sustained time above the moderate band, size for P90
    Moderate,
    /// High values were brief, size conservatively near the bulk (P75)
    Momentary,
}

/// Which percentile the effective peak was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakPercentile {
    P75,
    P90,
    P95,
}

/// Statistical summary of one metric over one window
///
/// `available == false` is the explicit "no data" state: every numeric
/// field is `None`, `duration_above` is empty and `sample_count` is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub average: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub sample_count: usize,
    pub available: bool,
    /// The single value chosen to represent "how high this realistically gets"
    pub effective_peak: Option<f64>,
    pub effective_peak_percentile: Option<PeakPercentile>,
    pub peak_type: Option<PeakType>,
    pub is_spike: bool,
    /// P95 minus P90; a large gap means the top percentile is an outlier
    pub spike_gap: Option<f64>,
    /// Minutes spent at or above each configured utilization threshold
    pub duration_above: BTreeMap<u32, f64>,
    pub duration_at_p95_minutes: f64,
}

impl MetricSummary {
    /// The "no data" sentinel
    pub fn unavailable() -> Self {
        Self {
            average: None,
            p75: None,
            p90: None,
            p95: None,
            p99: None,
            max: None,
            min: None,
            sample_count: 0,
            available: false,
            effective_peak: None,
            effective_peak_percentile: None,
            peak_type: None,
            is_spike: false,
            spike_gap: None,
            duration_above: BTreeMap::new(),
            duration_at_p95_minutes: 0.0,
        }
    }
}

/// CPU and memory summaries for a single instance over one window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceMetrics {
    pub instance_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub cpu: MetricSummary,
    pub memory: MetricSummary,
    pub metrics_available: bool,
}

/// Group-level rollup of per-instance summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedGroupMetrics {
    pub instance_count: usize,
    pub instances_with_metrics: usize,
    pub cpu: MetricSummary,
    pub memory: MetricSummary,
    pub per_instance: Vec<InstanceMetrics>,
}

/// Cluster classification driving the lookback policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterClassification {
    Transient,
    LongRunning,
}

/// Role an instance group plays within the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupRole {
    Master,
    Core,
    Task,
}

/// Purchasing model for an instance group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    OnDemand,
    Spot,
}

impl Default for Market {
    fn default() -> Self {
        Market::OnDemand
    }
}

/// Provider-side grouping of instances serving one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceGroup {
    pub id: String,
    pub name: String,
    pub role: GroupRole,
    pub instance_type: String,
    #[serde(default)]
    pub requested_count: u32,
    #[serde(default)]
    pub running_count: u32,
    #[serde(default)]
    pub market: Market,
    pub state: String,
    pub instance_ids: Vec<String>,
}

/// Cluster details from the inventory provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub id: String,
    pub name: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub runtime_hours: f64,
    pub classification: ClusterClassification,
    pub instance_groups: Vec<InstanceGroup>,
    #[serde(default)]
    pub normalized_instance_hours: u64,
    #[serde(default)]
    pub release_label: String,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ClusterInfo {
    /// Total running instances across all groups
    pub fn running_instances(&self) -> usize {
        self.instance_groups
            .iter()
            .map(|g| g.instance_ids.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_sentinel_is_fully_empty() {
        let summary = MetricSummary::unavailable();
        assert!(!summary.available);
        assert_eq!(summary.sample_count, 0);
        assert!(summary.average.is_none());
        assert!(summary.p75.is_none());
        assert!(summary.p90.is_none());
        assert!(summary.p95.is_none());
        assert!(summary.p99.is_none());
        assert!(summary.max.is_none());
        assert!(summary.min.is_none());
        assert!(summary.effective_peak.is_none());
        assert!(summary.effective_peak_percentile.is_none());
        assert!(summary.peak_type.is_none());
        assert!(!summary.is_spike);
        assert!(summary.spike_gap.is_none());
        assert!(summary.duration_above.is_empty());
        assert_eq!(summary.duration_at_p95_minutes, 0.0);
    }

    #[test]
    fn test_sentinel_serializes_with_nulls() {
        let json = serde_json::to_value(MetricSummary::unavailable()).unwrap();
        assert!(json["average"].is_null());
        assert!(json["effective_peak"].is_null());
        assert_eq!(json["available"], serde_json::json!(false));
        assert_eq!(json["sample_count"], serde_json::json!(0));
    }

    #[test]
    fn test_classification_wire_format() {
        let json = serde_json::to_string(&ClusterClassification::LongRunning).unwrap();
        assert_eq!(json, "\"LONG_RUNNING\"");
        let json = serde_json::to_string(&ClusterClassification::Transient).unwrap();
        assert_eq!(json, "\"TRANSIENT\"");
    }

    #[test]
    fn test_peak_type_wire_format() {
        let json = serde_json::to_string(&PeakType::Momentary).unwrap();
        assert_eq!(json, "\"momentary\"");
    }
}
