//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use optimizer_lib::{PeakType, SizingVerdict};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
#[allow(dead_code)]
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format an optional utilization percentage
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

/// Format hours for display
pub fn format_hours(hours: f64) -> String {
    if hours >= 48.0 {
        format!("{:.1}d", hours / 24.0)
    } else {
        format!("{:.1}h", hours)
    }
}

/// Color a sizing verdict
pub fn color_verdict(verdict: Option<SizingVerdict>) -> String {
    match verdict {
        Some(SizingVerdict::HeavilyOversized) => "heavily oversized".blue().to_string(),
        Some(SizingVerdict::ModeratelyOversized) => "moderately oversized".cyan().to_string(),
        Some(SizingVerdict::RightSized) => "right-sized".green().to_string(),
        Some(SizingVerdict::Undersized) => "undersized".red().bold().to_string(),
        None => "no data".dimmed().to_string(),
    }
}

/// Color a peak classification
pub fn color_peak_type(peak_type: Option<PeakType>) -> String {
    match peak_type {
        Some(PeakType::Sustained) => "sustained".red().to_string(),
        Some(PeakType::Moderate) => "moderate".yellow().to_string(),
        Some(PeakType::Momentary) => "momentary".green().to_string(),
        None => "-".to_string(),
    }
}

/// Format a timestamp for display
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
