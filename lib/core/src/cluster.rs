//! Connectivity clustering over an implicit similarity graph.
//!
//! Two entries are linked when their distance is at most the threshold; a
//! cluster is a connected component of that graph (single linkage cut at the
//! threshold). Components are found by flood fill:
//!
//! 1. Seed a cluster with the lowest index that is still unclustered.
//! 2. Pop an index from the frontier, compare it to every unclustered index,
//!    and move every linked index onto the frontier immediately so it is never
//!    scanned twice.
//! 3. Close the cluster once the frontier is empty.
//!
//! Every pair is compared at most once, so the worst case is `n(n-1)/2`
//! distance evaluations. There is no index or pruning: results are exact.
//!
//! ## Ordering
//!
//! The frontier is a stack and linked indices are pushed in ascending order.
//! Member indices of a closed cluster are sorted ascending, and clusters come
//! out in ascending order of their lowest member. Output is reproducible for a
//! given input order, threshold and weights.

use crate::{validate_entries, ClusterConfig, DistanceWeights, Entry, Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Counters collected during one clustering run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// `n(n-1)/2`, the worst case number of comparisons
    pub total_pairs: u64,
    /// Comparisons actually performed
    pub pairs_checked: u64,
    /// Number of seeded clusters
    pub iterations: usize,
}

/// Clusters as lists of entry indices, plus run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clustering {
    pub clusters: Vec<Vec<usize>>,
    pub stats: ClusterStats,
}

impl Clustering {
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Cluster label per item, indexed like the input
    pub fn labels(&self) -> Vec<usize> {
        let n = self.clusters.iter().map(Vec::len).sum();
        let mut labels = vec![0; n];
        for (label, members) in self.clusters.iter().enumerate() {
            for &idx in members {
                labels[idx] = label;
            }
        }
        labels
    }
}

/// Number of unordered pairs among `n` items
#[inline]
pub fn total_pairs(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Threshold based connected components clusterer
#[derive(Debug, Clone)]
pub struct ConnectivityClusterer {
    threshold: u64,
    weights: DistanceWeights,
    parallel: bool,
}

impl ConnectivityClusterer {
    pub fn new(threshold: u64, weights: DistanceWeights) -> Self {
        Self {
            threshold,
            weights,
            parallel: false,
        }
    }

    pub fn from_config(config: &ClusterConfig) -> Self {
        Self::new(config.distance_threshold, config.clustering_weights())
            .with_parallel(config.parallel)
    }

    /// Evaluate each expansion step on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn weights(&self) -> DistanceWeights {
        self.weights
    }

    /// Cluster entries with the configured weights.
    ///
    /// Fails with [`Error::InvalidEntry`] on an empty sequence.
    pub fn cluster(&self, entries: &[Entry]) -> Result<Clustering> {
        validate_entries(entries)?;
        let weights = self.weights;
        Ok(self.cluster_by(entries, |a, b| weights.distance(a, b)))
    }

    /// Cluster arbitrary items under a caller supplied distance.
    ///
    /// `distance` must be symmetric; it is called at most once per pair.
    pub fn cluster_by<T, F>(&self, items: &[T], distance: F) -> Clustering
    where
        T: Sync,
        F: Fn(&T, &T) -> u64 + Sync,
    {
        let mut stats = ClusterStats {
            total_pairs: total_pairs(items.len()),
            ..Default::default()
        };
        let mut clusters = Vec::new();

        // Unclustered indices, kept in ascending order
        let mut pending: Vec<usize> = (0..items.len()).collect();
        let mut frontier: Vec<usize> = Vec::new();

        while !pending.is_empty() {
            stats.iterations += 1;
            let started = Instant::now();
            debug!(
                iteration = stats.iterations,
                remaining = pending.len(),
                "Seeding cluster"
            );

            frontier.push(pending.remove(0));
            let mut members = Vec::new();

            while let Some(current) = frontier.pop() {
                members.push(current);
                if pending.is_empty() {
                    continue;
                }

                let linked = self.scan(items, current, &pending, &distance);
                stats.pairs_checked += pending.len() as u64;

                // Single writer: move linked indices from pending to the frontier
                let mut flags = linked.into_iter();
                pending.retain(|&idx| {
                    let is_linked = flags.next().unwrap_or(false);
                    if is_linked {
                        frontier.push(idx);
                    }
                    !is_linked
                });

                trace!(
                    pairs_checked = stats.pairs_checked,
                    total_pairs = stats.total_pairs,
                    "Checked {}/{} pairs ({:.2}%)",
                    stats.pairs_checked,
                    stats.total_pairs,
                    percent(stats.pairs_checked, stats.total_pairs)
                );
            }

            members.sort_unstable();
            debug!(
                iteration = stats.iterations,
                cluster_size = members.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Cluster closed"
            );
            clusters.push(members);
        }

        Clustering { clusters, stats }
    }

    /// Link flags for `current` against a snapshot of the pending indices
    fn scan<T, F>(&self, items: &[T], current: usize, pending: &[usize], distance: &F) -> Vec<bool>
    where
        T: Sync,
        F: Fn(&T, &T) -> u64 + Sync,
    {
        let anchor = &items[current];
        let threshold = self.threshold;
        let within = |&idx: &usize| distance(anchor, &items[idx]) <= threshold;
        if self.parallel {
            pending.par_iter().map(within).collect()
        } else {
            pending.iter().map(within).collect()
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        100.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Cluster entries under `threshold` and `weights`, returning index lists
pub fn cluster(entries: &[Entry], threshold: u64, weights: DistanceWeights) -> Result<Vec<Vec<usize>>> {
    ConnectivityClusterer::new(threshold, weights)
        .cluster(entries)
        .map(|clustering| clustering.clusters)
}

/// Cluster with a pair budget check.
///
/// The check runs before any distance is computed: when `n(n-1)/2` exceeds
/// `config.max_pairs`, nothing is clustered and
/// [`Error::ComputationBudgetExceeded`] is returned.
pub fn cluster_within_budget(entries: &[Entry], config: &ClusterConfig) -> Result<Clustering> {
    let pairs = total_pairs(entries.len());
    if let Some(budget) = config.max_pairs {
        if pairs > budget {
            return Err(Error::ComputationBudgetExceeded { pairs, budget });
        }
    }
    ConnectivityClusterer::from_config(config).cluster(entries)
}
