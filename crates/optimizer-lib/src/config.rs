//! Analysis configuration
//!
//! All engine entry points take an explicit [`AnalysisConfig`]; there is
//! no process-wide mutable state. Values can be overridden through the
//! environment with an `ECO_` prefix.

use anyhow::Result;
use serde::Deserialize;

/// Thresholds for one sizing band (maximum average / maximum peak)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SizingBand {
    pub avg_max: f64,
    pub peak_max: f64,
}

/// Utilization bands separating the sizing verdicts
///
/// Anything above the `right_sized` band is undersized.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SizingThresholds {
    pub heavily_oversized: SizingBand,
    pub moderately_oversized: SizingBand,
    pub right_sized: SizingBand,
}

impl Default for SizingThresholds {
    fn default() -> Self {
        Self {
            heavily_oversized: SizingBand {
                avg_max: 25.0,
                peak_max: 35.0,
            },
            moderately_oversized: SizingBand {
                avg_max: 50.0,
                peak_max: 60.0,
            },
            right_sized: SizingBand {
                avg_max: 70.0,
                peak_max: 80.0,
            },
        }
    }
}

/// Immutable configuration for one analysis run
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Utilization percentages tracked for duration-above accounting
    #[serde(default = "default_utilization_thresholds")]
    pub utilization_thresholds: Vec<u32>,

    /// P95-P90 gap (percentage points) above which P95 is treated as a spike
    #[serde(default = "default_spike_gap")]
    pub spike_detection_gap_percent: f64,

    /// Minutes a peak must hold to count as sustained
    #[serde(default = "default_sustained_minutes")]
    pub sustained_peak_threshold_minutes: f64,

    /// Sampling period of the metrics provider
    #[serde(default = "default_period_seconds")]
    pub period_seconds: u32,

    /// Lookback bound for transient clusters
    #[serde(default = "default_transient_lookback_hours")]
    pub transient_lookback_hours: i64,

    /// Lookback bound for long-running clusters
    #[serde(default = "default_max_lookback_days")]
    pub max_lookback_days: i64,

    /// Runtime beyond which an unmatched cluster counts as long-running
    #[serde(default = "default_long_running_threshold_hours")]
    pub long_running_threshold_hours: f64,

    /// Cluster names matching this pattern are always transient
    #[serde(default = "default_transient_name_pattern")]
    pub transient_name_pattern: String,

    /// Buffer applied on top of the effective peak when suggesting a target
    #[serde(default = "default_headroom_percent")]
    pub headroom_percent: f64,

    #[serde(default)]
    pub sizing: SizingThresholds,
}

fn default_utilization_thresholds() -> Vec<u32> {
    vec![50, 70, 80, 90]
}

fn default_spike_gap() -> f64 {
    15.0
}

fn default_sustained_minutes() -> f64 {
    15.0
}

fn default_period_seconds() -> u32 {
    300
}

fn default_transient_lookback_hours() -> i64 {
    4
}

fn default_max_lookback_days() -> i64 {
    3
}

fn default_long_running_threshold_hours() -> f64 {
    7.0
}

fn default_transient_name_pattern() -> String {
    r"^STRESS-\d+-(?:S|L|XL)$".to_string()
}

fn default_headroom_percent() -> f64 {
    20.0
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            utilization_thresholds: default_utilization_thresholds(),
            spike_detection_gap_percent: default_spike_gap(),
            sustained_peak_threshold_minutes: default_sustained_minutes(),
            period_seconds: default_period_seconds(),
            transient_lookback_hours: default_transient_lookback_hours(),
            max_lookback_days: default_max_lookback_days(),
            long_running_threshold_hours: default_long_running_threshold_hours(),
            transient_name_pattern: default_transient_name_pattern(),
            headroom_percent: default_headroom_percent(),
            sizing: SizingThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ECO"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// Minutes represented by one sample bucket
    pub fn period_minutes(&self) -> f64 {
        self.period_seconds as f64 / 60.0
    }
}
