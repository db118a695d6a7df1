//! Analysis orchestration
//!
//! Walks the inventory, computes the lookback window per cluster, fetches
//! utilization samples per instance, summarizes and aggregates them, and
//! attaches sizing recommendations per instance group. A failed fetch for
//! one instance or metric is logged and degrades to the "no data"
//! sentinel; it never aborts sibling instances or the run.

use crate::config::AnalysisConfig;
use crate::lookback::lookback_start;
use crate::models::{
    AggregatedGroupMetrics, ClusterClassification, ClusterInfo, InstanceGroup, InstanceMetrics,
    UtilizationSample,
};
use crate::provider::{ClusterInventory, MetricKind, MetricsProvider, ProviderError};
use crate::recommend::{recommend, Recommendation};
use crate::stats::{aggregate_group, summarize};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Analysis result for one instance group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAnalysis {
    pub group: InstanceGroup,
    pub metrics: AggregatedGroupMetrics,
    pub cpu_recommendation: Option<Recommendation>,
    pub memory_recommendation: Option<Recommendation>,
}

/// Analysis result for one cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    pub cluster_id: String,
    pub cluster_name: String,
    pub classification: ClusterClassification,
    pub analyzed_at: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub groups: Vec<GroupAnalysis>,
}

/// Drives the sizing analysis over the provider seams
pub struct Analyzer<I, M> {
    inventory: I,
    metrics: M,
    config: AnalysisConfig,
}

impl<I, M> Analyzer<I, M>
where
    I: ClusterInventory,
    M: MetricsProvider,
{
    pub fn new(inventory: I, metrics: M, config: AnalysisConfig) -> Self {
        Self {
            inventory,
            metrics,
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every cluster the inventory reports
    pub async fn analyze_all(&self) -> Result<Vec<ClusterAnalysis>, ProviderError> {
        let clusters = self.inventory.list_clusters().await?;
        info!(cluster_count = clusters.len(), "Starting fleet analysis");

        let mut analyses = Vec::with_capacity(clusters.len());
        for cluster in &clusters {
            analyses.push(self.analyze_cluster(cluster).await);
        }
        Ok(analyses)
    }

    /// Analyze a single cluster by identifier
    pub async fn analyze_cluster_id(
        &self,
        cluster_id: &str,
    ) -> Result<ClusterAnalysis, ProviderError> {
        let cluster = self.inventory.cluster(cluster_id).await?;
        Ok(self.analyze_cluster(&cluster).await)
    }

    /// Analyze one cluster's instance groups
    pub async fn analyze_cluster(&self, cluster: &ClusterInfo) -> ClusterAnalysis {
        let now = Utc::now();
        let window_start = lookback_start(
            cluster.classification,
            cluster.created_at,
            now,
            &self.config,
        );

        info!(
            cluster_id = %cluster.id,
            cluster_name = %cluster.name,
            classification = ?cluster.classification,
            window_start = %window_start,
            "Analyzing cluster"
        );

        let mut groups = Vec::with_capacity(cluster.instance_groups.len());
        for group in &cluster.instance_groups {
            let metrics = self.analyze_group(group, window_start, now).await;
            let cpu_recommendation = recommend(&metrics.cpu, &self.config);
            let memory_recommendation = recommend(&metrics.memory, &self.config);

            debug!(
                cluster_id = %cluster.id,
                group_id = %group.id,
                instances = group.instance_ids.len(),
                instances_with_metrics = metrics.instances_with_metrics,
                "Group analyzed"
            );

            groups.push(GroupAnalysis {
                group: group.clone(),
                metrics,
                cpu_recommendation,
                memory_recommendation,
            });
        }

        ClusterAnalysis {
            cluster_id: cluster.id.clone(),
            cluster_name: cluster.name.clone(),
            classification: cluster.classification,
            analyzed_at: now,
            window_start,
            window_end: now,
            groups,
        }
    }

    async fn analyze_group(
        &self,
        group: &InstanceGroup,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AggregatedGroupMetrics {
        let mut per_instance = Vec::with_capacity(group.instance_ids.len());
        for instance_id in &group.instance_ids {
            per_instance.push(self.instance_metrics(instance_id, start, end).await);
        }
        aggregate_group(per_instance, &self.config)
    }

    async fn instance_metrics(
        &self,
        instance_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> InstanceMetrics {
        let (cpu_samples, memory_samples) = tokio::join!(
            self.fetch(instance_id, MetricKind::Cpu, start, end),
            self.fetch(instance_id, MetricKind::Memory, start, end),
        );

        let cpu = summarize(&cpu_samples, &self.config);
        let memory = summarize(&memory_samples, &self.config);
        let metrics_available = cpu.available || memory.available;

        InstanceMetrics {
            instance_id: instance_id.to_string(),
            start_time: start,
            end_time: end,
            cpu,
            memory,
            metrics_available,
        }
    }

    /// Fetch one series; failures become an empty series
    async fn fetch(
        &self,
        instance_id: &str,
        kind: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<UtilizationSample> {
        match self
            .metrics
            .fetch_samples(instance_id, kind, start, end, self.config.period_seconds)
            .await
        {
            Ok(samples) => samples,
            Err(error) => {
                warn!(
                    instance_id = %instance_id,
                    metric = %kind.metric_name(),
                    error = %error,
                    "Metrics fetch failed, treating instance metric as unavailable"
                );
                Vec::new()
            }
        }
    }
}
