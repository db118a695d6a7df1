//! Analysis history persistence
//!
//! Stores past analysis runs in a JSON file so operators can compare
//! verdicts over time. Retention is bounded; the oldest runs are dropped
//! once the limit is reached.

use crate::analyzer::ClusterAnalysis;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One recorded analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub recorded_at: DateTime<Utc>,
    pub clusters: Vec<ClusterAnalysis>,
}

/// File-backed store of analysis runs
pub struct AnalysisHistory {
    path: PathBuf,
    max_runs: usize,
    runs: Vec<AnalysisRun>,
}

impl AnalysisHistory {
    pub const DEFAULT_MAX_RUNS: usize = 50;

    /// Load history from a file, starting empty if it does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let runs = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse history file {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            max_runs: Self::DEFAULT_MAX_RUNS,
            runs,
        })
    }

    pub fn with_max_runs(mut self, max_runs: usize) -> Self {
        self.max_runs = max_runs;
        self
    }

    /// Record a run and persist the file
    pub fn append(&mut self, clusters: Vec<ClusterAnalysis>) -> Result<()> {
        self.runs.push(AnalysisRun {
            recorded_at: Utc::now(),
            clusters,
        });

        if self.runs.len() > self.max_runs {
            let excess = self.runs.len() - self.max_runs;
            self.runs.drain(..excess);
        }

        self.save()
    }

    pub fn runs(&self) -> &[AnalysisRun] {
        &self.runs
    }

    pub fn latest(&self) -> Option<&AnalysisRun> {
        self.runs.last()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(&self.runs).context("Failed to serialize history")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write history file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClusterClassification;

    fn analysis(cluster_id: &str) -> ClusterAnalysis {
        let now = Utc::now();
        ClusterAnalysis {
            cluster_id: cluster_id.to_string(),
            cluster_name: format!("{cluster_id}-name"),
            classification: ClusterClassification::Transient,
            analyzed_at: now,
            window_start: now,
            window_end: now,
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = AnalysisHistory::load(dir.path().join("history.json")).unwrap();
        assert!(history.runs().is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_append_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = AnalysisHistory::load(&path).unwrap();
        history.append(vec![analysis("j-A")]).unwrap();
        history.append(vec![analysis("j-B")]).unwrap();

        let reloaded = AnalysisHistory::load(&path).unwrap();
        assert_eq!(reloaded.runs().len(), 2);
        assert_eq!(reloaded.latest().unwrap().clusters[0].cluster_id, "j-B");
    }

    #[test]
    fn test_retention_drops_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = AnalysisHistory::load(&path).unwrap().with_max_runs(2);
        history.append(vec![analysis("j-A")]).unwrap();
        history.append(vec![analysis("j-B")]).unwrap();
        history.append(vec![analysis("j-C")]).unwrap();

        assert_eq!(history.runs().len(), 2);
        assert_eq!(history.runs()[0].clusters[0].cluster_id, "j-B");
        assert_eq!(history.latest().unwrap().clusters[0].cluster_id, "j-C");
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut history = AnalysisHistory::load(&path).unwrap();
        history.append(vec![analysis("j-A")]).unwrap();
        assert!(path.exists());
    }
}
