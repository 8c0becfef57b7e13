//! # seqclust Core
//!
//! Core library for clustering short positioned subsequences.
//!
//! This crate provides the clustering engine:
//!
//! - [`Entry`] - A subsequence tagged with its source id and start offset
//! - [`DistanceWeights`] - Weighted content + position distance
//! - [`ConnectivityClusterer`] - Threshold based connected components
//! - [`Summarizer`] - Per-cluster statistics in canonical order
//!
//! ## Example
//!
//! ```rust
//! use seqclust_core::{ConnectivityClusterer, DistanceWeights, Entry, Summarizer};
//!
//! let entries = vec![
//!     Entry::new("s1", 0, "ATGAAATAG"),
//!     Entry::new("s2", 0, "ATGAAATAG"),
//!     Entry::new("s3", 1000, "ATGCCCTAG"),
//! ];
//!
//! let clustering = ConnectivityClusterer::new(21, DistanceWeights::CLUSTERING)
//!     .cluster(&entries)
//!     .unwrap();
//! assert_eq!(clustering.clusters, vec![vec![0, 1], vec![2]]);
//!
//! let reports = Summarizer::default()
//!     .summarize(&clustering.clusters, &entries)
//!     .unwrap();
//! assert_eq!(reports[0].num_entries, 2);
//! assert_eq!(reports[0].avg_distance, 0.0);
//! ```

pub mod cluster;
pub mod config;
pub mod distance;
pub mod entry;
pub mod error;
pub mod summary;

pub use cluster::{cluster, cluster_within_budget, total_pairs, ClusterStats, Clustering, ConnectivityClusterer};
pub use config::{ClusterConfig, DEFAULT_DISTANCE_THRESHOLD};
pub use distance::{content_difference, distance, position_difference, DistanceWeights};
pub use entry::{validate_entries, Entry, RawEntry};
pub use error::{Error, Result};
pub use summary::{summarize, ClusterReport, Summarizer};
