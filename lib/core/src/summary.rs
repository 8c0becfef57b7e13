//! Per-cluster statistics and canonical report ordering.

use crate::{DistanceWeights, Entry, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One cluster as it appears in the exported report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// 1-based rank after ordering by size, largest first
    pub cluster_id: usize,
    pub num_entries: usize,
    /// Mean distance over all unordered member pairs, 0 for singletons
    pub avg_distance: f64,
    pub entries: Vec<Entry>,
}

/// Builds [`ClusterReport`]s from clustered indices
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    weights: DistanceWeights,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DistanceWeights::REPORTING)
    }
}

impl Summarizer {
    /// `weights` only affect `avg_distance`; they are independent of the
    /// weights used to form the clusters.
    pub fn new(weights: DistanceWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> DistanceWeights {
        self.weights
    }

    /// Mean pairwise distance of a group of entries
    pub fn average_distance(&self, members: &[&Entry]) -> f64 {
        let n = members.len();
        if n < 2 {
            return 0.0;
        }

        let mut total: u128 = 0;
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                total += u128::from(self.weights.distance(a, b));
            }
        }
        let pairs = (n * (n - 1) / 2) as f64;
        total as f64 / pairs
    }

    /// Summarize clusters and order them by size.
    ///
    /// Clusters are sorted by `num_entries` descending with a stable sort, so
    /// equal sizes keep their discovery order; `cluster_id` is the resulting
    /// 1-based rank. Member entries keep the order of the index lists.
    pub fn summarize(&self, clusters: &[Vec<usize>], entries: &[Entry]) -> Result<Vec<ClusterReport>> {
        let mut reports = Vec::with_capacity(clusters.len());

        for (position, indices) in clusters.iter().enumerate() {
            let members = indices
                .iter()
                .map(|&idx| {
                    entries.get(idx).ok_or_else(|| Error::InvalidEntry {
                        index: idx,
                        reason: format!(
                            "cluster references entry {} but only {} entries were given",
                            idx,
                            entries.len()
                        ),
                    })
                })
                .collect::<Result<Vec<&Entry>>>()?;

            let avg_distance = self.average_distance(&members);
            debug!(
                cluster = position + 1,
                num_entries = members.len(),
                avg_distance,
                "Analyzed cluster"
            );

            reports.push(ClusterReport {
                cluster_id: 0,
                num_entries: members.len(),
                avg_distance,
                entries: members.into_iter().cloned().collect(),
            });
        }

        reports.sort_by(|a, b| b.num_entries.cmp(&a.num_entries));
        for (rank, report) in reports.iter_mut().enumerate() {
            report.cluster_id = rank + 1;
        }

        Ok(reports)
    }
}

/// Summarize with the reporting weights, see [`Summarizer::summarize`]
pub fn summarize(clusters: &[Vec<usize>], entries: &[Entry]) -> Result<Vec<ClusterReport>> {
    Summarizer::default().summarize(clusters, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::new("s1", 0, "ATGAAATAG"),
            Entry::new("s2", 2, "ATGAACTAG"),
            Entry::new("s3", 400, "ATGCCCTAG"),
            Entry::new("s1", 9, "ATGAAATAG"),
            Entry::new("s4", 800, "ATAGGGTGA"),
            Entry::new("s4", 803, "ATAGGGTGA"),
        ]
    }

    #[test]
    fn test_singleton_average_is_zero() {
        let entries = sample_entries();
        let reports = summarize(&[vec![2]], &entries).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].avg_distance, 0.0);
        assert_eq!(reports[0].num_entries, 1);
    }

    #[test]
    fn test_average_uses_reporting_weights() {
        let entries = sample_entries();
        // Pairs: (0,1) = 2*1 + 2 = 4, (0,3) = 0 + 9 = 9, (1,3) = 2*1 + 7 = 9
        let reports = summarize(&[vec![0, 1, 3]], &entries).unwrap();
        assert!((reports[0].avg_distance - 22.0 / 3.0).abs() < 1e-9);

        let custom = Summarizer::new(DistanceWeights::CLUSTERING)
            .summarize(&[vec![0, 1, 3]], &entries)
            .unwrap();
        // (0,1) = 4 + 2 = 6, (0,3) = 9, (1,3) = 4 + 7 = 11
        assert!((custom[0].avg_distance - 26.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordering_and_ids() {
        let entries = sample_entries();
        let clusters = vec![vec![2], vec![0, 1, 3], vec![4, 5]];
        let reports = summarize(&clusters, &entries).unwrap();

        let sizes: Vec<usize> = reports.iter().map(|r| r.num_entries).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        let ids: Vec<usize> = reports.iter().map(|r| r.cluster_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(reports[2].entries[0].sequence_id(), "s3");
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let entries = sample_entries();
        let clusters = vec![vec![2], vec![0, 1], vec![4, 5], vec![3]];
        let reports = summarize(&clusters, &entries).unwrap();

        assert_eq!(reports[0].entries[0].sequence_id(), "s1");
        assert_eq!(reports[1].entries[0].sequence_id(), "s4");
        assert_eq!(reports[2].entries[0].sequence_id(), "s3");
        assert_eq!(reports[3].entries[0].start_position(), 9);
    }

    #[test]
    fn test_member_order_follows_indices() {
        let entries = sample_entries();
        let reports = summarize(&[vec![4, 5]], &entries).unwrap();
        let starts: Vec<u64> = reports[0].entries.iter().map(Entry::start_position).collect();
        assert_eq!(starts, vec![800, 803]);
    }

    #[test]
    fn test_out_of_range_index() {
        let entries = sample_entries();
        let err = summarize(&[vec![0, 17]], &entries).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { index: 17, .. }));
    }

    #[test]
    fn test_empty_clusters() {
        let reports = summarize(&[], &[]).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let entries = sample_entries();
        let reports = summarize(&[vec![4, 5]], &entries).unwrap();
        let value = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(value["cluster_id"], 1);
        assert_eq!(value["num_entries"], 2);
        assert_eq!(value["avg_distance"], 3.0);
        assert_eq!(value["entries"][1]["sequence_id"], "s4");
        assert_eq!(value["entries"][1]["start_position"], 803);
        assert_eq!(value["entries"][1]["sequence"], "ATAGGGTGA");
    }
}
