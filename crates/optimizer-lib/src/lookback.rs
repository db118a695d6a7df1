//! Lookback window calculation
//!
//! Bounds the metrics query window per cluster classification: the window
//! never starts before the cluster existed and never exceeds the
//! classification's maximum lookback.

use crate::config::AnalysisConfig;
use crate::models::ClusterClassification;
use chrono::{DateTime, Duration, Utc};

/// Start of the metrics window for a cluster
pub fn lookback_start(
    classification: ClusterClassification,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> DateTime<Utc> {
    let max_lookback = match classification {
        ClusterClassification::Transient => now - Duration::hours(config.transient_lookback_hours),
        ClusterClassification::LongRunning => now - Duration::days(config.max_lookback_days),
    };

    created_at.max(max_lookback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_recent_cluster_uses_creation_time() {
        let config = AnalysisConfig::default();
        let now = Utc::now();
        let created_at = now - Duration::hours(1);

        let start = lookback_start(ClusterClassification::Transient, created_at, now, &config);
        assert_eq!(start, created_at);
    }

    #[test]
    fn test_transient_old_cluster_capped_at_lookback() {
        let config = AnalysisConfig::default();
        let now = Utc::now();
        let created_at = now - Duration::hours(48);

        let start = lookback_start(ClusterClassification::Transient, created_at, now, &config);
        assert_eq!(start, now - Duration::hours(config.transient_lookback_hours));
    }

    #[test]
    fn test_long_running_capped_at_max_days() {
        let config = AnalysisConfig::default();
        let now = Utc::now();
        let created_at = now - Duration::days(30);

        let start = lookback_start(ClusterClassification::LongRunning, created_at, now, &config);
        assert_eq!(start, now - Duration::days(config.max_lookback_days));
    }

    #[test]
    fn test_window_never_precedes_creation() {
        let config = AnalysisConfig::default();
        let now = Utc::now();

        for hours in [1, 3, 5, 24, 100] {
            let created_at = now - Duration::hours(hours);
            for classification in [
                ClusterClassification::Transient,
                ClusterClassification::LongRunning,
            ] {
                let start = lookback_start(classification, created_at, now, &config);
                assert!(start >= created_at);
                let bound = match classification {
                    ClusterClassification::Transient => {
                        now - Duration::hours(config.transient_lookback_hours)
                    }
                    ClusterClassification::LongRunning => {
                        now - Duration::days(config.max_lookback_days)
                    }
                };
                assert!(start >= bound);
            }
        }
    }
}
