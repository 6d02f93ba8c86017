// Immutable snapshot history of one algorithm run

use super::{Snapshot, TraceResult};
use crate::errors::InvariantViolation;
use serde::Serialize;

/// Ordered, finite, non-empty sequence of snapshots.
///
/// Index 0 is the pre-execution state and the last index is terminal. A trace
/// is never patched after construction; loading new input builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    total_steps: usize,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self, InvariantViolation> {
        if snapshots.is_empty() {
            return Err(InvariantViolation::EmptyTrace);
        }
        Ok(Trace {
            total_steps: snapshots.len() - 1,
            snapshots,
        })
    }

    /// Build from a recorder's history, which always holds frame 0
    pub(crate) fn from_recorded(snapshots: Vec<Snapshot>) -> Self {
        debug_assert!(!snapshots.is_empty(), "recorder lost its initial frame");
        Trace {
            total_steps: snapshots.len().saturating_sub(1),
            snapshots,
        }
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Companion to `len`
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn initial(&self) -> &Snapshot {
        &self.snapshots[0]
    }

    pub fn terminal(&self) -> &Snapshot {
        &self.snapshots[self.total_steps]
    }

    pub fn result(&self) -> Option<&TraceResult> {
        self.terminal().result.as_ref()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Estimated bytes held by all snapshots
    pub fn memory_usage(&self) -> usize {
        self.snapshots.iter().map(Snapshot::estimated_size).sum()
    }

    /// Verify the structural guarantees a player depends on.
    ///
    /// `fixed_length` is set for pure rearrangement algorithms, whose array
    /// length must not change anywhere in the trace.
    pub fn check_invariants(
        &self,
        input: &[i64],
        fixed_length: bool,
    ) -> Result<(), InvariantViolation> {
        let first = self.initial();
        if first.array_state != input {
            return Err(InvariantViolation::InitialStateAltered);
        }
        if !first.marked_indices.is_empty() || !first.pointers.is_empty() {
            return Err(InvariantViolation::InitialStateMarked);
        }

        for (position, snapshot) in self.snapshots.iter().enumerate() {
            if snapshot.index != position {
                return Err(InvariantViolation::IndexMismatch {
                    position,
                    index: snapshot.index,
                });
            }
            if fixed_length && snapshot.array_state.len() != input.len() {
                return Err(InvariantViolation::LengthChanged {
                    step: position,
                    expected: input.len(),
                    got: snapshot.array_state.len(),
                });
            }
            if snapshot.result.is_some() && position != self.total_steps {
                return Err(InvariantViolation::EarlyResult { step: position });
            }
        }

        for (step, pair) in self.snapshots.windows(2).enumerate() {
            let (before, after) = (pair[0].metrics, pair[1].metrics);
            if after.comparisons < before.comparisons {
                return Err(InvariantViolation::MetricsDecreased {
                    counter: "comparisons",
                    step: step + 1,
                    before: before.comparisons,
                    after: after.comparisons,
                });
            }
            if after.swaps < before.swaps {
                return Err(InvariantViolation::MetricsDecreased {
                    counter: "swaps",
                    step: step + 1,
                    before: before.swaps,
                    after: after.swaps,
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
