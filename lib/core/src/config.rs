use crate::DistanceWeights;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTANCE_THRESHOLD: u64 = 21;

/// Clustering parameters
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum distance at which two entries are directly linked
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: u64,

    #[serde(default = "default_letter_weight")]
    pub letter_weight: u64,

    #[serde(default = "default_position_weight")]
    pub position_weight: u64,

    /// Letter weight used for `avg_distance` in reports
    #[serde(default = "default_report_letter_weight")]
    pub report_letter_weight: u64,

    /// Position weight used for `avg_distance` in reports
    #[serde(default = "default_report_position_weight")]
    pub report_position_weight: u64,

    /// Refuse to cluster when the number of pairs exceeds this budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pairs: Option<u64>,

    /// Evaluate distances on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_distance_threshold() -> u64 {
    DEFAULT_DISTANCE_THRESHOLD
}

fn default_letter_weight() -> u64 {
    DistanceWeights::CLUSTERING.letter
}

fn default_position_weight() -> u64 {
    DistanceWeights::CLUSTERING.position
}

fn default_report_letter_weight() -> u64 {
    DistanceWeights::REPORTING.letter
}

fn default_report_position_weight() -> u64 {
    DistanceWeights::REPORTING.position
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            letter_weight: default_letter_weight(),
            position_weight: default_position_weight(),
            report_letter_weight: default_report_letter_weight(),
            report_position_weight: default_report_position_weight(),
            max_pairs: None,
            parallel: false,
        }
    }
}

impl ClusterConfig {
    /// Weights deciding cluster membership
    pub fn clustering_weights(&self) -> DistanceWeights {
        DistanceWeights::new(self.letter_weight, self.position_weight)
    }

    /// Weights used by the summarizer
    pub fn report_weights(&self) -> DistanceWeights {
        DistanceWeights::new(self.report_letter_weight, self.report_position_weight)
    }
}
