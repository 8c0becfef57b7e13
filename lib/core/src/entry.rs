use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A positioned subsequence cut out of a larger source sequence.
///
/// Entries are immutable once built: the fields are only reachable through
/// accessors so `start_position` can never be recomputed after loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    sequence_id: String,
    start_position: u64,
    sequence: String,
}

impl Entry {
    pub fn new(
        sequence_id: impl Into<String>,
        start_position: u64,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            start_position,
            sequence: sequence.into(),
        }
    }

    /// Identifier of the source sequence this entry was extracted from
    #[inline]
    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    #[inline]
    pub fn start_position(&self) -> u64 {
        self.start_position
    }

    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of symbols in the subsequence
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// An entry record as produced by the upstream scanner, before validation.
///
/// Every field is optional so that a missing field surfaces as
/// [`Error::InvalidEntry`] instead of a bare parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub start_position: Option<i64>,
    #[serde(default)]
    pub sequence: Option<String>,
}

impl RawEntry {
    /// Validate the record and tag it with its source identifier.
    ///
    /// `index` is the position of the record in the overall entry list and is
    /// only used for error reporting.
    pub fn into_entry(self, sequence_id: impl Into<String>, index: usize) -> Result<Entry> {
        let start_position = match self.start_position {
            Some(pos) if pos < 0 => {
                return Err(Error::InvalidEntry {
                    index,
                    reason: format!("negative start_position {}", pos),
                })
            }
            Some(pos) => pos as u64,
            None => {
                return Err(Error::InvalidEntry {
                    index,
                    reason: "missing field start_position".to_string(),
                })
            }
        };

        let sequence = match self.sequence {
            Some(seq) if seq.is_empty() => {
                return Err(Error::InvalidEntry {
                    index,
                    reason: "empty sequence".to_string(),
                })
            }
            Some(seq) => seq,
            None => {
                return Err(Error::InvalidEntry {
                    index,
                    reason: "missing field sequence".to_string(),
                })
            }
        };

        Ok(Entry::new(sequence_id, start_position, sequence))
    }
}

/// Fail fast on entries that would skew distances.
///
/// Entries built through [`Entry::new`] or deserialized directly skip the
/// checks done by [`RawEntry::into_entry`], so the clusterer re-checks them.
pub fn validate_entries(entries: &[Entry]) -> Result<()> {
    match entries.iter().position(Entry::is_empty) {
        Some(index) => Err(Error::InvalidEntry {
            index,
            reason: "empty sequence".to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_entry_conversion() {
        let raw = RawEntry {
            start_position: Some(42),
            sequence: Some("ATGAAATAG".to_string()),
        };
        let entry = raw.into_entry("seq_1", 0).unwrap();
        assert_eq!(entry.sequence_id(), "seq_1");
        assert_eq!(entry.start_position(), 42);
        assert_eq!(entry.sequence(), "ATGAAATAG");
        assert_eq!(entry.len(), 9);
    }

    #[test]
    fn test_raw_entry_rejects_negative_position() {
        let raw = RawEntry {
            start_position: Some(-3),
            sequence: Some("ATG".to_string()),
        };
        let err = raw.into_entry("s", 7).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { index: 7, .. }));
    }

    #[test]
    fn test_raw_entry_rejects_missing_fields() {
        let no_seq = RawEntry {
            start_position: Some(0),
            sequence: None,
        };
        assert!(matches!(
            no_seq.into_entry("s", 0),
            Err(Error::InvalidEntry { .. })
        ));

        let no_pos = RawEntry {
            start_position: None,
            sequence: Some("ATG".to_string()),
        };
        let err = no_pos.into_entry("s", 1).unwrap_err();
        assert!(err.to_string().contains("start_position"));
    }

    #[test]
    fn test_raw_entry_rejects_empty_sequence() {
        let raw: RawEntry =
            serde_json::from_str(r#"{"start_position": 3, "sequence": ""}"#).unwrap();
        assert!(matches!(
            raw.into_entry("s", 2),
            Err(Error::InvalidEntry { index: 2, .. })
        ));
    }

    #[test]
    fn test_validate_entries() {
        let entries = vec![Entry::new("a", 0, "ATG"), Entry::new("b", 3, "")];
        let err = validate_entries(&entries).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { index: 1, .. }));
        assert!(validate_entries(&entries[..1]).is_ok());
        assert!(validate_entries(&[]).is_ok());
    }
}
