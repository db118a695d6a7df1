//! Sizing verdicts and recommendations
//!
//! Compares a group's average and effective peak against the configured
//! sizing bands and suggests a utilization target with headroom.

use crate::config::AnalysisConfig;
use crate::models::{MetricSummary, PeakType};
use crate::stats::round2;
use serde::{Deserialize, Serialize};

/// How a group's provisioning compares to its observed utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingVerdict {
    HeavilyOversized,
    ModeratelyOversized,
    RightSized,
    Undersized,
}

impl SizingVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingVerdict::HeavilyOversized => "heavily_oversized",
            SizingVerdict::ModeratelyOversized => "moderately_oversized",
            SizingVerdict::RightSized => "right_sized",
            SizingVerdict::Undersized => "undersized",
        }
    }
}

/// Sizing recommendation for one metric of one group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: SizingVerdict,
    pub average: f64,
    pub effective_peak: f64,
    pub peak_type: Option<PeakType>,
    /// Utilization the group could run at, peak plus headroom, capped at 100
    pub suggested_target: f64,
    pub reason: String,
}

/// Produce a sizing recommendation from a group summary
///
/// Returns `None` when the summary carries no data.
pub fn recommend(summary: &MetricSummary, config: &AnalysisConfig) -> Option<Recommendation> {
    if !summary.available {
        return None;
    }
    let average = summary.average?;
    let peak = summary.effective_peak.or(summary.p95)?;

    let bands = &config.sizing;
    let verdict = if average <= bands.heavily_oversized.avg_max
        && peak <= bands.heavily_oversized.peak_max
    {
        SizingVerdict::HeavilyOversized
    } else if average <= bands.moderately_oversized.avg_max
        && peak <= bands.moderately_oversized.peak_max
    {
        SizingVerdict::ModeratelyOversized
    } else if average <= bands.right_sized.avg_max && peak <= bands.right_sized.peak_max {
        SizingVerdict::RightSized
    } else {
        SizingVerdict::Undersized
    };

    let suggested_target = round2((peak * (1.0 + config.headroom_percent / 100.0)).min(100.0));

    let reason = match verdict {
        SizingVerdict::HeavilyOversized => format!(
            "average {average:.1}% and effective peak {peak:.1}% leave most capacity idle"
        ),
        SizingVerdict::ModeratelyOversized => format!(
            "average {average:.1}% and effective peak {peak:.1}% leave room to consolidate"
        ),
        SizingVerdict::RightSized => format!(
            "average {average:.1}% and effective peak {peak:.1}% fit the provisioned capacity"
        ),
        SizingVerdict::Undersized => format!(
            "average {average:.1}% or effective peak {peak:.1}% exceeds the right-sized band"
        ),
    };

    Some(Recommendation {
        verdict,
        average,
        effective_peak: peak,
        peak_type: summary.peak_type,
        suggested_target,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricSummary;

    fn summary(average: f64, effective_peak: f64) -> MetricSummary {
        MetricSummary {
            average: Some(average),
            p95: Some(effective_peak),
            effective_peak: Some(effective_peak),
            peak_type: Some(PeakType::Sustained),
            sample_count: 24,
            available: true,
            ..MetricSummary::unavailable()
        }
    }

    #[test]
    fn test_unavailable_yields_none() {
        let config = AnalysisConfig::default();
        assert!(recommend(&MetricSummary::unavailable(), &config).is_none());
    }

    #[test]
    fn test_band_boundaries() {
        let config = AnalysisConfig::default();

        let r = recommend(&summary(20.0, 30.0), &config).unwrap();
        assert_eq!(r.verdict, SizingVerdict::HeavilyOversized);

        let r = recommend(&summary(40.0, 55.0), &config).unwrap();
        assert_eq!(r.verdict, SizingVerdict::ModeratelyOversized);

        let r = recommend(&summary(65.0, 78.0), &config).unwrap();
        assert_eq!(r.verdict, SizingVerdict::RightSized);

        let r = recommend(&summary(85.0, 95.0), &config).unwrap();
        assert_eq!(r.verdict, SizingVerdict::Undersized);
    }

    #[test]
    fn test_peak_alone_can_undersize() {
        let config = AnalysisConfig::default();
        // low average but a peak above every band
        let r = recommend(&summary(20.0, 92.0), &config).unwrap();
        assert_eq!(r.verdict, SizingVerdict::Undersized);
    }

    #[test]
    fn test_suggested_target_headroom() {
        let config = AnalysisConfig::default();
        let r = recommend(&summary(40.0, 50.0), &config).unwrap();
        assert_eq!(r.suggested_target, 60.0);
    }

    #[test]
    fn test_suggested_target_capped() {
        let config = AnalysisConfig::default();
        let r = recommend(&summary(85.0, 95.0), &config).unwrap();
        assert_eq!(r.suggested_target, 100.0);
    }

    #[test]
    fn test_falls_back_to_p95_without_effective_peak() {
        let config = AnalysisConfig::default();
        let mut s = summary(40.0, 55.0);
        s.effective_peak = None;
        let r = recommend(&s, &config).unwrap();
        assert_eq!(r.effective_peak, 55.0);
    }
}
