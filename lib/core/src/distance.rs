//! Weighted distance between two entries.
//!
//! The score combines a content term and a position term:
//!
//! ```text
//! d(a, b) = letter * content(a, b) + position * |start(a) - start(b)|
//! ```
//!
//! `content` counts mismatching symbols over the common prefix length plus the
//! difference in lengths. It is not an edit distance: entries are expected to
//! be roughly aligned already by the way they were extracted.

use crate::Entry;
use serde::{Deserialize, Serialize};

/// Letter and position weights of the distance formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistanceWeights {
    pub letter: u64,
    pub position: u64,
}

impl DistanceWeights {
    /// Weights used to decide cluster membership
    pub const CLUSTERING: Self = Self::new(4, 1);

    /// Weights used to compute `avg_distance` in cluster reports.
    ///
    /// These differ from [`DistanceWeights::CLUSTERING`] on purpose; reports
    /// keep their own scale regardless of the threshold weights.
    pub const REPORTING: Self = Self::new(2, 1);

    #[inline]
    pub const fn new(letter: u64, position: u64) -> Self {
        Self { letter, position }
    }

    /// Distance between two entries under these weights
    #[inline]
    pub fn distance(&self, a: &Entry, b: &Entry) -> u64 {
        let content = content_difference(a.sequence(), b.sequence());
        let position = position_difference(a.start_position(), b.start_position());
        self.letter
            .saturating_mul(content)
            .saturating_add(self.position.saturating_mul(position))
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self::CLUSTERING
    }
}

/// Distance between two entries, see [`DistanceWeights::distance`]
#[inline]
pub fn distance(a: &Entry, b: &Entry, weights: DistanceWeights) -> u64 {
    weights.distance(a, b)
}

/// Mismatches over the shared length plus the length difference
pub fn content_difference(a: &str, b: &str) -> u64 {
    let mut lhs = a.chars();
    let mut rhs = b.chars();
    let mut diff = 0u64;
    loop {
        match (lhs.next(), rhs.next()) {
            (Some(x), Some(y)) => {
                if x != y {
                    diff += 1;
                }
            }
            // Past the shorter sequence every remaining symbol counts once
            (Some(_), None) | (None, Some(_)) => diff += 1,
            (None, None) => return diff,
        }
    }
}

#[inline]
pub fn position_difference(a: u64, b: u64) -> u64 {
    a.abs_diff(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_difference() {
        assert_eq!(content_difference("ATGAAATAG", "ATGAAATAG"), 0);
        assert_eq!(content_difference("ATGAAATAG", "ATGCCCTAG"), 3);
        // Two extra symbols on the right
        assert_eq!(content_difference("ATG", "ATGCA"), 2);
        // One mismatch plus a length difference of one
        assert_eq!(content_difference("ATGA", "TTG"), 2);
    }

    #[test]
    fn test_distance_default_weights() {
        let a = Entry::new("s1", 0, "ATGAAATAG");
        let b = Entry::new("s2", 1000, "ATGCCCTAG");
        assert_eq!(DistanceWeights::default(), DistanceWeights::CLUSTERING);
        assert_eq!(distance(&a, &b, DistanceWeights::CLUSTERING), 4 * 3 + 1000);
        assert_eq!(distance(&a, &b, DistanceWeights::REPORTING), 2 * 3 + 1000);
    }

    #[test]
    fn test_distance_identical_entries() {
        let a = Entry::new("s1", 12, "ATGAAATAG");
        let b = Entry::new("s2", 12, "ATGAAATAG");
        assert_eq!(distance(&a, &b, DistanceWeights::CLUSTERING), 0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let entries = [
            Entry::new("a", 0, "ATGAAATAG"),
            Entry::new("b", 9, "ATGCCCTAGTAA"),
            Entry::new("c", 300, "ATA"),
            Entry::new("d", 3, "ATGAAGTGA"),
        ];
        for weights in [DistanceWeights::CLUSTERING, DistanceWeights::new(7, 3)] {
            for a in &entries {
                for b in &entries {
                    assert_eq!(weights.distance(a, b), weights.distance(b, a));
                }
            }
        }
    }

    #[test]
    fn test_distance_saturates() {
        let a = Entry::new("a", 0, "A");
        let b = Entry::new("b", u64::MAX, "C");
        let weights = DistanceWeights::new(u64::MAX, u64::MAX);
        assert_eq!(weights.distance(&a, &b), u64::MAX);
    }
}
