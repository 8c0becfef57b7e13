//! # seqclust
//!
//! Groups short positioned subsequences into clusters of mutually similar
//! entries.
//!
//! Two entries are linked when their weighted distance
//! (`letter_weight * content + position_weight * |offset difference|`) is at
//! most a threshold; clusters are the connected components of those links.
//! Each cluster is reported with its size and mean pairwise distance, largest
//! cluster first.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! seqclust --input ANALYZED_DATA --output CLUSTERED_DATA --distance-threshold 21
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use seqclust::prelude::*;
//!
//! let entries = vec![
//!     Entry::new("s1", 0, "ATGAAATAG"),
//!     Entry::new("s2", 0, "ATGAAATAG"),
//! ];
//! let clusters = cluster(&entries, 21, DistanceWeights::CLUSTERING).unwrap();
//! let reports = summarize(&clusters, &entries).unwrap();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].avg_distance, 0.0);
//! ```
//!
//! ## Crate Structure
//!
//! - `seqclust-core` - Entries, distance, clustering, summaries
//! - `seqclust-storage` - Entry loading and report export

pub mod pipeline;

// Re-export core types
pub use seqclust_core::{
    cluster, cluster_within_budget, distance, summarize,
    ClusterConfig, ClusterReport, ClusterStats, Clustering, ConnectivityClusterer,
    DistanceWeights, Entry, RawEntry, Summarizer,
    Error, Result,
};

// Re-export storage
pub use seqclust_storage::{load_entries, render_json, render_text, ReportPaths, ReportWriter};

pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cluster, summarize,
        ClusterConfig, ClusterReport, ConnectivityClusterer,
        DistanceWeights, Entry, Summarizer,
        Error, Result,
        Pipeline, PipelineConfig,
    };
}
