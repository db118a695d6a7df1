//! Library for EMR cluster right-sizing analysis
//!
//! This crate provides the core functionality for:
//! - Turning raw utilization samples into statistical summaries
//! - Sustained-peak selection and spike detection
//! - Conservative aggregation across instance groups
//! - Lookback windows and cluster classification
//! - Sizing verdicts and analysis history

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod history;
pub mod lookback;
pub mod models;
pub mod provider;
pub mod recommend;
pub mod stats;

pub use analyzer::{Analyzer, ClusterAnalysis, GroupAnalysis};
pub use classify::{runtime_hours, ClusterClassifier};
pub use config::{AnalysisConfig, SizingBand, SizingThresholds};
pub use history::{AnalysisHistory, AnalysisRun};
pub use lookback::lookback_start;
pub use models::*;
pub use provider::{ClusterInventory, MetricKind, MetricsProvider, ProviderError};
pub use recommend::{recommend, Recommendation, SizingVerdict};
pub use stats::{aggregate, aggregate_group, select_peak, summarize, PeakDecision};
