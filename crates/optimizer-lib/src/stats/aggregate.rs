//! Group-level aggregation of per-instance summaries
//!
//! Raw samples are not available at this layer; aggregation works over
//! the per-instance [`MetricSummary`] values only. Combination rules are
//! deliberately conservative: percentile fields use mean-of-means, the
//! group extremes come from per-instance averages rather than raw
//! extremes, and the worst per-instance peak classification wins.

use super::{mean, percentile, round1, round2, series_max, series_min};
use crate::config::AnalysisConfig;
use crate::models::{
    AggregatedGroupMetrics, InstanceMetrics, MetricSummary, PeakPercentile, PeakType,
};
use std::collections::BTreeMap;

/// Combine per-instance summaries for one metric into a group summary
///
/// Inputs are expected to be `available` summaries; an empty input yields
/// the "no data" sentinel.
pub fn aggregate(summaries: &[MetricSummary], config: &AnalysisConfig) -> MetricSummary {
    if summaries.is_empty() {
        return MetricSummary::unavailable();
    }

    let averages: Vec<f64> = summaries.iter().filter_map(|s| s.average).collect();
    if averages.is_empty() {
        return MetricSummary::unavailable();
    }

    let average = mean(&averages);
    let p75 = mean_or_percentile(summaries, |s| s.p75, &averages, 75.0);
    let p90 = mean_or_percentile(summaries, |s| s.p90, &averages, 90.0);
    let p95 = mean_or_percentile(summaries, |s| s.p95, &averages, 95.0);
    let p99 = mean_or_percentile(summaries, |s| s.p99, &averages, 99.0);

    let effective_peaks: Vec<f64> = summaries.iter().filter_map(|s| s.effective_peak).collect();
    let effective_peak = if effective_peaks.is_empty() {
        p95
    } else {
        mean(&effective_peaks)
    };

    let mut duration_above = BTreeMap::new();
    for &threshold in &config.utilization_thresholds {
        let durations: Vec<f64> = summaries
            .iter()
            .map(|s| s.duration_above.get(&threshold).copied().unwrap_or(0.0))
            .collect();
        duration_above.insert(threshold, round1(mean(&durations)));
    }

    let durations_at_p95: Vec<f64> = summaries.iter().map(|s| s.duration_at_p95_minutes).collect();
    let duration_at_p95_minutes = mean(&durations_at_p95);

    let spike_gaps: Vec<f64> = summaries.iter().filter_map(|s| s.spike_gap).collect();
    let spike_gap = mean(&spike_gaps);
    let is_spike = spike_gap > config.spike_detection_gap_percent;

    let (peak_type, effective_peak_percentile) = worst_case_peak_type(summaries);

    MetricSummary {
        average: Some(round2(average)),
        p75: Some(round2(p75)),
        p90: Some(round2(p90)),
        p95: Some(round2(p95)),
        p99: Some(round2(p99)),
        // intentionally bounded by per-instance averages, not raw extremes
        max: series_max(&averages).map(round2),
        min: series_min(&averages).map(round2),
        sample_count: averages.len(),
        available: true,
        effective_peak: Some(round2(effective_peak)),
        effective_peak_percentile: Some(effective_peak_percentile),
        peak_type: Some(peak_type),
        is_spike,
        spike_gap: Some(round2(spike_gap)),
        duration_above,
        duration_at_p95_minutes: round1(duration_at_p95_minutes),
    }
}

/// Roll per-instance CPU and memory summaries into group metrics
pub fn aggregate_group(
    per_instance: Vec<InstanceMetrics>,
    config: &AnalysisConfig,
) -> AggregatedGroupMetrics {
    let cpu_inputs: Vec<MetricSummary> = per_instance
        .iter()
        .filter(|m| m.cpu.available)
        .map(|m| m.cpu.clone())
        .collect();
    let memory_inputs: Vec<MetricSummary> = per_instance
        .iter()
        .filter(|m| m.memory.available)
        .map(|m| m.memory.clone())
        .collect();
    let instances_with_metrics = per_instance.iter().filter(|m| m.metrics_available).count();

    AggregatedGroupMetrics {
        instance_count: per_instance.len(),
        instances_with_metrics,
        cpu: aggregate(&cpu_inputs, config),
        memory: aggregate(&memory_inputs, config),
        per_instance,
    }
}

/// Mean of a per-instance field, recomputed from averages when absent
fn mean_or_percentile(
    summaries: &[MetricSummary],
    field: impl Fn(&MetricSummary) -> Option<f64>,
    averages: &[f64],
    p: f64,
) -> f64 {
    let values: Vec<f64> = summaries.iter().filter_map(field).collect();
    if values.is_empty() {
        percentile(averages, p)
    } else {
        mean(&values)
    }
}

/// Most conservative peak classification across instances
fn worst_case_peak_type(summaries: &[MetricSummary]) -> (PeakType, PeakPercentile) {
    let types: Vec<PeakType> = summaries.iter().filter_map(|s| s.peak_type).collect();
    if types.contains(&PeakType::Momentary) {
        (PeakType::Momentary, PeakPercentile::P75)
    } else if types.contains(&PeakType::Moderate) {
        (PeakType::Moderate, PeakPercentile::P90)
    } else {
        (PeakType::Sustained, PeakPercentile::P95)
    }
}
