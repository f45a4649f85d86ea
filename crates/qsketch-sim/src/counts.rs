//! Measurement outcome histogram.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::statevector::index_to_bitstring;

/// Occurrence count of each observed bitstring.
///
/// Bitstrings list qubit 0 first. Counts always sum to [`shots`](Self::shots).
/// Outcomes that were never observed are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeHistogram {
    num_qubits: u32,
    shots: u64,
    counts: BTreeMap<String, u64>,
}

impl OutcomeHistogram {
    /// Build a histogram from a tally of basis-state indices.
    pub(crate) fn from_tally(num_qubits: u32, tally: FxHashMap<usize, u64>) -> Self {
        let shots = tally.values().sum();
        let counts = tally
            .into_iter()
            .map(|(index, count)| (index_to_bitstring(index, num_qubits), count))
            .collect();
        Self {
            num_qubits,
            shots,
            counts,
        }
    }

    /// Width of every bitstring.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Total number of shots.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Count for `bitstring`, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Observed frequency of `bitstring`.
    pub fn frequency(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / self.shots as f64
    }

    /// Number of distinct observed outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Outcomes sorted by descending count, ties in bitstring order.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted().into_iter().next()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram() -> OutcomeHistogram {
        let mut tally = FxHashMap::default();
        tally.insert(0b00, 40);
        tally.insert(0b11, 55);
        tally.insert(0b01, 5);
        OutcomeHistogram::from_tally(2, tally)
    }

    #[test]
    fn test_totals() {
        let h = histogram();
        assert_eq!(h.shots(), 100);
        assert_eq!(h.len(), 3);
        assert_eq!(h.get("11"), 55);
        assert_eq!(h.get("10"), 5); // index 0b01 is qubit 0 set
        assert_eq!(h.get("01"), 0);
        assert!((h.frequency("00") - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_sorted() {
        let h = histogram();
        assert_eq!(h.sorted(), vec![("11", 55), ("00", 40), ("10", 5)]);
        assert_eq!(h.most_frequent(), Some(("11", 55)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(histogram()).unwrap();
        assert_eq!(json["shots"], 100);
        assert_eq!(json["counts"]["00"], 40);
    }
}
