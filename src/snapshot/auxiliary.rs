//! Family-specific structural payloads carried next to the main array
//!
//! A snapshot carries at most one of these. Renderers match on the variant;
//! adding a variant never changes the meaning of the existing ones.

use super::Frequency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open index range `[start, end)` of a sorted run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuxiliaryState {
    /// Radix and bucket sort distribution
    #[serde(rename_all = "camelCase")]
    Buckets {
        buckets: Vec<Vec<i64>>,
        active_bucket: Option<usize>,
        /// Radix pass exponent (`base^digit`), absent for value-range buckets
        digit: Option<u32>,
    },

    /// Counting sort tallies; `counts[k]` is the tally for value `offset + k`
    #[serde(rename_all = "camelCase")]
    Count {
        counts: Vec<usize>,
        offset: i64,
        active: Option<usize>,
    },

    /// Binary heap laid out level by level
    #[serde(rename_all = "camelCase")]
    Heap {
        nodes: Vec<i64>,
        heap_size: usize,
        /// Set while the root is being moved out of the heap
        removing: bool,
    },

    /// Two sorted halves being merged into `merged`
    #[serde(rename_all = "camelCase")]
    Merge {
        left: Vec<i64>,
        right: Vec<i64>,
        merged: Vec<i64>,
        start: usize,
        end: usize,
    },

    /// Shell sort gap sequence and the gap currently in use
    #[serde(rename_all = "camelCase")]
    Gap { gap: usize, sequence: Vec<usize> },

    /// Lomuto partition state for `[low, high]`
    #[serde(rename_all = "camelCase")]
    Partition {
        pivot_index: usize,
        pivot_value: i64,
        boundary: usize,
        low: usize,
        high: usize,
    },

    #[serde(rename_all = "camelCase")]
    Runs {
        runs: Vec<Run>,
        min_run: usize,
        active: Option<usize>,
    },

    /// Occurrence counts seen so far
    #[serde(rename_all = "camelCase")]
    Mode {
        counts: BTreeMap<i64, usize>,
        best: Option<Frequency>,
    },

    /// Boyer-Moore vote state
    #[serde(rename_all = "camelCase")]
    Voting { candidate: Option<i64>, count: usize },

    /// Open brackets waiting for a partner, bottom first
    #[serde(rename_all = "camelCase")]
    Stack { items: Vec<i64> },
}

impl AuxiliaryState {
    pub(crate) fn estimated_size(&self) -> usize {
        let slots = match self {
            AuxiliaryState::Buckets { buckets, .. } => {
                buckets.iter().map(|b| b.len() + 3).sum::<usize>()
            }
            AuxiliaryState::Count { counts, .. } => counts.len(),
            AuxiliaryState::Heap { nodes, .. } => nodes.len(),
            AuxiliaryState::Merge {
                left,
                right,
                merged,
                ..
            } => left.len() + right.len() + merged.len(),
            AuxiliaryState::Gap { sequence, .. } => sequence.len(),
            AuxiliaryState::Partition { .. } => 5,
            AuxiliaryState::Runs { runs, .. } => runs.len() * 2,
            AuxiliaryState::Mode { counts, .. } => counts.len() * 2,
            AuxiliaryState::Voting { .. } => 2,
            AuxiliaryState::Stack { items } => items.len(),
        };
        slots * 8
    }
}
