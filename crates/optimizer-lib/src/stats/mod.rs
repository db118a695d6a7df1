//! Statistics engine for utilization analysis
//!
//! This module turns raw utilization samples into per-instance summaries
//! and rolls those up into group-level summaries:
//! - [`summarize`] processes one instance's raw samples
//! - [`aggregate`] combines per-instance summaries conservatively
//! - [`select_peak`] decides which percentile is safe to size for

mod aggregate;
mod peak;
mod summary;

pub use aggregate::{aggregate, aggregate_group};
pub use peak::{select_peak, PeakDecision};
pub use summary::summarize;

use std::cmp::Ordering;

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile with linear interpolation between order statistics
///
/// `rank = p/100 * (n-1)`; non-integral ranks interpolate between the two
/// neighboring sorted values. Callers guarantee a non-empty slice.
pub(crate) fn percentile(values: &[f64], p: f64) -> f64 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

pub(crate) fn series_max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

pub(crate) fn series_min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
