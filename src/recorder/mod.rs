//! Instrumentation handed to step generators
//!
//! A generator runs its algorithm on a private working copy and, at every
//! observable event, builds a [`Frame`] from the current array and emits it:
//!
//! ```ignore
//! rec.frame(&a)
//!     .compare(j, j + 1)
//!     .var("j", j)
//!     .emit(format!("Compare {} and {}", a[j], a[j + 1]));
//! ```
//!
//! Marks, pointers, variables and the auxiliary payload start empty for every
//! frame. Nothing carries over from the previous snapshot; a generator that
//! wants a mark on two consecutive steps sets it on both. Only the metrics
//! and the echoed expression accumulate.

use crate::snapshot::{
    AuxiliaryState, Mark, Metrics, Pointer, PointerColor, Snapshot, Trace, TraceResult,
    VarValue, Variable,
};
use std::ops::Range;

/// Collects snapshots for one generator run
#[derive(Debug)]
pub struct Recorder {
    snapshots: Vec<Snapshot>,
    metrics: Metrics,
    expression: Option<String>,
}

impl Recorder {
    /// Start a recording whose frame 0 is `input` verbatim
    pub fn new(input: &[i64]) -> Self {
        Recorder {
            snapshots: vec![Snapshot::initial(input)],
            metrics: Metrics::default(),
            expression: None,
        }
    }

    /// Like [`Recorder::new`], echoing `expression` on every frame
    pub fn with_expression(input: &[i64], expression: impl Into<String>) -> Self {
        let expression = expression.into();
        let mut initial = Snapshot::initial(input);
        initial.expression = Some(expression.clone());
        Recorder {
            snapshots: vec![initial],
            metrics: Metrics::default(),
            expression: Some(expression),
        }
    }

    /// Begin the next frame showing `array`
    pub fn frame(&mut self, array: &[i64]) -> Frame<'_> {
        let snapshot = Snapshot {
            index: self.snapshots.len(),
            array_state: array.to_vec(),
            expression: self.expression.clone(),
            metrics: self.metrics,
            ..Snapshot::initial(&[])
        };
        Frame {
            recorder: self,
            snapshot,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Companion to `len`
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn finish(self) -> Trace {
        Trace::from_recorded(self.snapshots)
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.metrics = snapshot.metrics;
        self.snapshots.push(snapshot);
    }
}

/// One snapshot under construction; nothing is recorded until [`Frame::emit`]
#[must_use = "a frame is only recorded once emit() is called"]
pub struct Frame<'r> {
    recorder: &'r mut Recorder,
    snapshot: Snapshot,
}

impl Frame<'_> {
    /// Mark `i` and `j` as compared and count one comparison
    pub fn compare(mut self, i: usize, j: usize) -> Self {
        self.snapshot.marked_indices.insert(i, Mark::Comparing);
        self.snapshot.marked_indices.insert(j, Mark::Comparing);
        self.snapshot.metrics.comparisons += 1;
        self
    }

    /// Mark a single index as compared (against a target or pivot value)
    pub fn compare_one(mut self, i: usize) -> Self {
        self.snapshot.marked_indices.insert(i, Mark::Comparing);
        self.snapshot.metrics.comparisons += 1;
        self
    }

    /// Count comparisons that have no index to highlight
    pub fn count_comparisons(mut self, n: u64) -> Self {
        self.snapshot.metrics.comparisons += n;
        self
    }

    /// Count moves that happen outside the main array (inside a bucket, …)
    pub fn count_swaps(mut self, n: u64) -> Self {
        self.snapshot.metrics.swaps += n;
        self
    }

    /// Mark `i` and `j` as swapped and count one swap
    pub fn swap(mut self, i: usize, j: usize) -> Self {
        self.snapshot.marked_indices.insert(i, Mark::Swapping);
        self.snapshot.marked_indices.insert(j, Mark::Swapping);
        self.snapshot.metrics.swaps += 1;
        self
    }

    /// Count one array write (shift, copy-back) as a swap, marking `i`
    pub fn write(mut self, i: usize) -> Self {
        self.snapshot.marked_indices.insert(i, Mark::Swapping);
        self.snapshot.metrics.swaps += 1;
        self
    }

    pub fn mark(mut self, i: usize, mark: Mark) -> Self {
        self.snapshot.marked_indices.insert(i, mark);
        self
    }

    pub fn mark_range(mut self, range: Range<usize>, mark: Mark) -> Self {
        for i in range {
            self.snapshot.marked_indices.insert(i, mark);
        }
        self
    }

    pub fn mark_all<I>(mut self, indices: I, mark: Mark) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        for i in indices {
            self.snapshot.marked_indices.insert(i, mark);
        }
        self
    }

    pub fn pointer(mut self, index: usize, label: &str, color: PointerColor) -> Self {
        self.snapshot.pointers.push(Pointer {
            index,
            label: label.to_string(),
            color,
        });
        self
    }

    pub fn var(self, name: &str, value: impl Into<VarValue>) -> Self {
        self.push_var(name, value.into(), false)
    }

    /// A variable that changed on this step
    pub fn var_changed(self, name: &str, value: impl Into<VarValue>) -> Self {
        self.push_var(name, value.into(), true)
    }

    pub fn aux(mut self, auxiliary: AuxiliaryState) -> Self {
        self.snapshot.auxiliary_state = Some(auxiliary);
        self
    }

    pub fn result(mut self, result: TraceResult) -> Self {
        self.snapshot.result = Some(result);
        self
    }

    /// Record the frame with its step description
    pub fn emit(mut self, message: impl Into<String>) {
        self.snapshot.message = message.into();
        self.recorder.push(self.snapshot);
    }

    fn push_var(mut self, name: &str, value: VarValue, highlight: bool) -> Self {
        self.snapshot.variables.push(Variable {
            name: name.to_string(),
            value,
            highlight,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_frame_is_input() {
        let rec = Recorder::new(&[4, 2, 9]);
        assert_eq!(rec.len(), 1);
        assert!(!rec.is_empty());
        let trace = rec.finish();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.initial().array_state, vec![4, 2, 9]);
        assert!(trace.initial().marked_indices.is_empty());
    }

    #[test]
    fn test_marks_do_not_carry_over() {
        let mut rec = Recorder::new(&[2, 1]);
        rec.frame(&[2, 1])
            .compare(0, 1)
            .pointer(0, "i", PointerColor::Primary)
            .var("i", 0usize)
            .emit("compare");
        rec.frame(&[1, 2]).emit("plain");
        let trace = rec.finish();

        let plain = trace.get(2).unwrap();
        assert!(plain.marked_indices.is_empty());
        assert!(plain.pointers.is_empty());
        assert!(plain.variables.is_empty());
    }

    #[test]
    fn test_metrics_accumulate() {
        let mut rec = Recorder::new(&[3, 2, 1]);
        rec.frame(&[3, 2, 1]).compare(0, 1).emit("c1");
        rec.frame(&[2, 3, 1]).swap(0, 1).emit("s1");
        rec.frame(&[2, 3, 1]).compare(1, 2).emit("c2");
        let trace = rec.finish();

        let last = trace.terminal().metrics;
        assert_eq!(last.comparisons, 2);
        assert_eq!(last.swaps, 1);
        assert_eq!(trace.get(2).unwrap().metrics.comparisons, 1);
    }

    #[test]
    fn test_expression_echoed_on_every_frame() {
        let mut rec = Recorder::with_expression(&[40, 41], "()");
        rec.frame(&[40, 41]).emit("next");
        let trace = rec.finish();
        assert!(trace
            .iter()
            .all(|s| s.expression.as_deref() == Some("()")));
    }

    #[test]
    fn test_later_mark_wins() {
        let mut rec = Recorder::new(&[1, 2]);
        rec.frame(&[1, 2])
            .mark(0, Mark::Sorted)
            .compare(0, 1)
            .emit("overlap");
        let trace = rec.finish();
        assert_eq!(trace.get(1).unwrap().mark_at(0), Some(Mark::Comparing));
    }
}
