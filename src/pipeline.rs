//! Load -> cluster -> summarize -> export, as one all-or-nothing run.

use anyhow::{Context, Result};
use seqclust_core::{
    cluster_within_budget, ClusterConfig, ClusterReport, ClusterStats, Entry, Summarizer,
};
use seqclust_storage::{load_entries, ReportPaths, ReportWriter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

pub const DEFAULT_INPUT_LOCATION: &str = "ANALYZED_DATA";
pub const DEFAULT_OUTPUT_LOCATION: &str = "CLUSTERED_DATA";

/// Paths plus clustering parameters for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the scanner's `*.json` entry files
    #[serde(default = "default_input_location")]
    pub input_location: PathBuf,

    /// Directory receiving `clusters.json` and `clusters.txt`
    #[serde(default = "default_output_location")]
    pub output_location: PathBuf,

    #[serde(flatten)]
    pub cluster: ClusterConfig,
}

fn default_input_location() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_LOCATION)
}

fn default_output_location() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_LOCATION)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_location: default_input_location(),
            output_location: default_output_location(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON configuration file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub reports: Vec<ClusterReport>,
    pub stats: ClusterStats,
    pub paths: ReportPaths,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cluster and summarize entries already in memory
    pub fn cluster_entries(&self, entries: &[Entry]) -> Result<(Vec<ClusterReport>, ClusterStats)> {
        let cluster = &self.config.cluster;
        info!(
            "Clustering {} entries (threshold {}, letter weight {}, position weight {})",
            entries.len(),
            cluster.distance_threshold,
            cluster.letter_weight,
            cluster.position_weight
        );

        let started = Instant::now();
        let clustering = cluster_within_budget(entries, cluster)?;
        info!(
            "Clustering completed in {:.2}s: {} clusters, {}/{} pairs checked",
            started.elapsed().as_secs_f64(),
            clustering.len(),
            clustering.stats.pairs_checked,
            clustering.stats.total_pairs
        );

        let reports = Summarizer::new(cluster.report_weights())
            .summarize(&clustering.clusters, entries)?;
        Ok((reports, clustering.stats))
    }

    /// Run the whole pipeline; nothing is written unless every stage succeeds
    pub fn run(&self) -> Result<PipelineOutput> {
        info!("Loading entries from {:?}", self.config.input_location);
        let entries = load_entries(&self.config.input_location)?;

        let (reports, stats) = self.cluster_entries(&entries)?;

        let writer = ReportWriter::new(&self.config.output_location)?;
        let paths = writer.write(&reports)?;

        Ok(PipelineOutput {
            reports,
            stats,
            paths,
        })
    }
}
