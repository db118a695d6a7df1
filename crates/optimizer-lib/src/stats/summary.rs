//! Sample processing for a single instance and metric
//!
//! Converts a raw set of utilization samples into a [`MetricSummary`]:
//! mean, percentiles, min/max, time spent above each configured
//! threshold, spike detection and the sustained-peak decision.

use super::{mean, percentile, round1, round2, select_peak, series_max, series_min};
use crate::config::AnalysisConfig;
use crate::models::{MetricSummary, Statistic, UtilizationSample};
use std::collections::BTreeMap;

/// Values within 5% of P95 count as "at P95 level"
const P95_LEVEL_FACTOR: f64 = 0.95;

/// Summarize one instance's samples for one metric
///
/// The `Average` statistic forms the base series; `Maximum`/`Minimum`
/// samples refine the extremes when present. An empty input, or one with
/// no `Average` samples, yields the "no data" sentinel.
pub fn summarize(samples: &[UtilizationSample], config: &AnalysisConfig) -> MetricSummary {
    if samples.is_empty() {
        return MetricSummary::unavailable();
    }

    let averages: Vec<f64> = values_of(samples, Statistic::Average);
    if averages.is_empty() {
        return MetricSummary::unavailable();
    }
    let maximums = values_of(samples, Statistic::Maximum);
    let minimums = values_of(samples, Statistic::Minimum);

    let average = mean(&averages);
    let max_value = series_max(&maximums)
        .or_else(|| series_max(&averages))
        .unwrap_or(average);
    let min_value = series_min(&minimums)
        .or_else(|| series_min(&averages))
        .unwrap_or(average);

    let p75 = percentile(&averages, 75.0);
    let p90 = percentile(&averages, 90.0);
    let p95 = percentile(&averages, 95.0);
    let p99 = percentile(&averages, 99.0);

    // Each sample bucket represents one sampling period
    let period_minutes = config.period_minutes();
    let mut duration_above = BTreeMap::new();
    for &threshold in &config.utilization_thresholds {
        let count = averages.iter().filter(|&&v| v >= threshold as f64).count();
        duration_above.insert(threshold, round1(count as f64 * period_minutes));
    }

    let spike_gap = p95 - p90;
    let is_spike = spike_gap > config.spike_detection_gap_percent;

    let at_p95_level = averages
        .iter()
        .filter(|&&v| v >= p95 * P95_LEVEL_FACTOR)
        .count();
    let duration_at_p95_minutes = at_p95_level as f64 * period_minutes;

    let decision = select_peak(
        p75,
        p90,
        p95,
        &duration_above,
        duration_at_p95_minutes,
        is_spike,
        config.sustained_peak_threshold_minutes,
    );

    MetricSummary {
        average: Some(round2(average)),
        p75: Some(round2(p75)),
        p90: Some(round2(p90)),
        p95: Some(round2(p95)),
        p99: Some(round2(p99)),
        max: Some(round2(max_value)),
        min: Some(round2(min_value)),
        sample_count: averages.len(),
        available: true,
        effective_peak: Some(round2(decision.effective_peak)),
        effective_peak_percentile: Some(decision.percentile),
        peak_type: Some(decision.peak_type),
        is_spike,
        spike_gap: Some(round2(spike_gap)),
        duration_above,
        duration_at_p95_minutes: round1(duration_at_p95_minutes),
    }
}

fn values_of(samples: &[UtilizationSample], statistic: Statistic) -> Vec<f64> {
    samples
        .iter()
        .filter(|s| s.statistic == statistic)
        .map(|s| s.value)
        .collect()
}
