//! Cluster classification
//!
//! Classifies clusters as transient or long-running. A name matching the
//! transient pattern always wins; otherwise the runtime decides.

use crate::config::AnalysisConfig;
use crate::models::ClusterClassification;
use crate::stats::round2;
use chrono::{DateTime, Utc};
use regex::Regex;

/// Classifies clusters by name pattern and runtime
pub struct ClusterClassifier {
    transient_pattern: Regex,
    long_running_threshold_hours: f64,
}

impl ClusterClassifier {
    pub fn new(config: &AnalysisConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            transient_pattern: Regex::new(&config.transient_name_pattern)?,
            long_running_threshold_hours: config.long_running_threshold_hours,
        })
    }

    /// Classify a cluster
    ///
    /// 1. Name matches the transient pattern: transient.
    /// 2. Runtime above the long-running threshold: long-running.
    /// 3. Otherwise transient.
    pub fn classify(&self, name: &str, runtime_hours: f64) -> ClusterClassification {
        if self.transient_pattern.is_match(name) {
            return ClusterClassification::Transient;
        }

        if runtime_hours > self.long_running_threshold_hours {
            return ClusterClassification::LongRunning;
        }

        ClusterClassification::Transient
    }
}

/// Hours a cluster has been running, rounded to 2 decimals
pub fn runtime_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - created_at).num_seconds().max(0);
    round2(seconds as f64 / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn classifier() -> ClusterClassifier {
        ClusterClassifier::new(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_name_pattern_wins() {
        let c = classifier();
        // even a long runtime does not override the pattern
        assert_eq!(
            c.classify("STRESS-123456-XL", 100.0),
            ClusterClassification::Transient
        );
        assert_eq!(
            c.classify("STRESS-42-S", 0.5),
            ClusterClassification::Transient
        );
    }

    #[test]
    fn test_runtime_threshold() {
        let c = classifier();
        assert_eq!(
            c.classify("etl-nightly", 8.0),
            ClusterClassification::LongRunning
        );
        assert_eq!(
            c.classify("etl-nightly", 6.0),
            ClusterClassification::Transient
        );
        // boundary is exclusive
        assert_eq!(
            c.classify("etl-nightly", 7.0),
            ClusterClassification::Transient
        );
    }

    #[test]
    fn test_non_matching_names() {
        let c = classifier();
        // must match the whole name
        assert_eq!(
            c.classify("STRESS-123-M", 10.0),
            ClusterClassification::LongRunning
        );
        assert_eq!(
            c.classify("prefix-STRESS-123-S", 10.0),
            ClusterClassification::LongRunning
        );
    }

    #[test]
    fn test_runtime_hours() {
        let now = Utc::now();
        assert_eq!(runtime_hours(now - Duration::hours(3), now), 3.0);
        assert_eq!(runtime_hours(now - Duration::minutes(90), now), 1.5);
        // clock skew degrades to zero rather than negative runtime
        assert_eq!(runtime_hours(now + Duration::hours(1), now), 0.0);
    }
}
