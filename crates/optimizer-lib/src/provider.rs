//! Provider seams for cluster inventory and metrics
//!
//! The analyzer is pure computation over already-fetched data; these
//! traits are the boundary to the cloud APIs (or to snapshot files in
//! offline use). Failures at this boundary are typed and degrade to the
//! "no data" sentinel instead of aborting a run.

use crate::models::{ClusterInfo, UtilizationSample};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use async_trait::async_trait;

/// Metric fetched for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cpu,
    Memory,
}

impl MetricKind {
    /// Provider namespace the metric lives in
    pub fn namespace(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "AWS/EC2",
            MetricKind::Memory => "CWAgent",
        }
    }

    /// Provider-side metric name
    pub fn metric_name(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPUUtilization",
            MetricKind::Memory => "mem_used_percent",
        }
    }
}

/// Failure at the provider boundary
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("request throttled: {0}")]
    Throttled(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Source of utilization samples for instances
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Fetch samples for one instance and metric over a window
    ///
    /// Buckets may carry any subset of the Average/Maximum/Minimum
    /// statistics; an empty result is legal and means no data.
    async fn fetch_samples(
        &self,
        instance_id: &str,
        kind: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_seconds: u32,
    ) -> Result<Vec<UtilizationSample>, ProviderError>;
}

/// Source of cluster inventory
#[async_trait]
pub trait ClusterInventory: Send + Sync {
    /// All running (and recently terminated) clusters
    async fn list_clusters(&self) -> Result<Vec<ClusterInfo>, ProviderError>;

    /// A single cluster by identifier
    async fn cluster(&self, cluster_id: &str) -> Result<ClusterInfo, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kind_mapping() {
        assert_eq!(MetricKind::Cpu.namespace(), "AWS/EC2");
        assert_eq!(MetricKind::Cpu.metric_name(), "CPUUtilization");
        assert_eq!(MetricKind::Memory.namespace(), "CWAgent");
        assert_eq!(MetricKind::Memory.metric_name(), "mem_used_percent");
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("j-ABC123".to_string());
        assert_eq!(err.to_string(), "resource not found: j-ABC123");
    }
}
