//! Effective-peak selection policy
//!
//! Maps a distribution's shape (how long the top percentiles were held,
//! whether P95 is an outlier spike) to the single value used for sizing.

use crate::models::{PeakPercentile, PeakType};
use std::collections::BTreeMap;

/// Utilization band checked when P95 was not sustained
const MODERATE_BAND_PERCENT: u32 = 80;

/// Outcome of the peak selection policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDecision {
    pub effective_peak: f64,
    pub percentile: PeakPercentile,
    pub peak_type: PeakType,
}

/// Choose the effective peak for sizing
///
/// Exactly one branch fires:
/// 1. P95 held for at least the sustained threshold and is not a spike:
///    size for P95.
/// 2. Otherwise, if utilization spent sustained time above 80%: size for
///    P90.
/// 3. Otherwise the high values were brief; size near the bulk of the
///    distribution (P75).
pub fn select_peak(
    p75: f64,
    p90: f64,
    p95: f64,
    duration_above: &BTreeMap<u32, f64>,
    duration_at_p95_minutes: f64,
    is_spike: bool,
    sustained_threshold_minutes: f64,
) -> PeakDecision {
    if duration_at_p95_minutes >= sustained_threshold_minutes && !is_spike {
        return PeakDecision {
            effective_peak: p95,
            percentile: PeakPercentile::P95,
            peak_type: PeakType::Sustained,
        };
    }

    let minutes_above_band = duration_above
        .get(&MODERATE_BAND_PERCENT)
        .copied()
        .unwrap_or(0.0);
    if minutes_above_band >= sustained_threshold_minutes {
        return PeakDecision {
            effective_peak: p90,
            percentile: PeakPercentile::P90,
            peak_type: PeakType::Moderate,
        };
    }

    PeakDecision {
        effective_peak: p75,
        percentile: PeakPercentile::P75,
        peak_type: PeakType::Momentary,
    }
}
