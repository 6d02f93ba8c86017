//! Comparison sorts
//!
//! All of these rearrange the input in place, so the array length is
//! constant across the trace, and all require at least two elements.
//! Positions that have reached their final place are re-marked `Sorted` on
//! every frame after they settle.

use super::require_len;
use crate::errors::ValidationError;
use crate::recorder::{Frame, Recorder};
use crate::registry::Params;
use crate::snapshot::{AuxiliaryState, Mark, PointerColor, Run, Trace};

const BUBBLE: &str = "Bubble sort";
const SELECTION: &str = "Selection sort";
const INSERTION: &str = "Insertion sort";
const QUICK: &str = "Quick sort";
const MERGE: &str = "Merge sort";
const HEAP: &str = "Heap sort";
const SHELL: &str = "Shell sort";
const TIM: &str = "Tim sort";

/// Adjacent compare-and-swap passes; stops after a pass with no swaps
pub fn bubble_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(BUBBLE, input, 2)?;
    let mut a = input.to_vec();
    let n = a.len();
    let mut rec = Recorder::new(input);

    for pass in 0..n - 1 {
        // a[end + 1..] is already in place
        let end = n - 1 - pass;
        let mut swapped = false;

        for j in 0..end {
            let message = format!("Compare {} and {}", a[j], a[j + 1]);
            rec.frame(&a)
                .compare(j, j + 1)
                .mark_range(end + 1..n, Mark::Sorted)
                .pointer(j, "j", PointerColor::Primary)
                .var("pass", pass + 1)
                .var("j", j)
                .emit(message);

            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                swapped = true;
                let message = format!("{} > {}, swap them", a[j + 1], a[j]);
                rec.frame(&a)
                    .swap(j, j + 1)
                    .mark_range(end + 1..n, Mark::Sorted)
                    .pointer(j, "j", PointerColor::Primary)
                    .var("pass", pass + 1)
                    .var("j", j)
                    .var_changed("swapped", true)
                    .emit(message);
            }
        }

        if !swapped {
            rec.frame(&a)
                .var("pass", pass + 1)
                .var_changed("swapped", false)
                .emit("No swaps in this pass, the array is sorted");
            break;
        }

        let message = format!("{} is in its final position", a[end]);
        rec.frame(&a)
            .mark_range(end..n, Mark::Sorted)
            .var("pass", pass + 1)
            .emit(message);
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// Repeatedly select the minimum of the unsorted suffix
pub fn selection_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(SELECTION, input, 2)?;
    let mut a = input.to_vec();
    let n = a.len();
    let mut rec = Recorder::new(input);

    for i in 0..n - 1 {
        let mut min = i;
        let message = format!("Pass {}: assume {} is the minimum", i + 1, a[i]);
        rec.frame(&a)
            .mark_range(0..i, Mark::Sorted)
            .mark(i, Mark::Minimum)
            .pointer(i, "i", PointerColor::Primary)
            .var("i", i)
            .var_changed("min", i)
            .emit(message);

        for j in i + 1..n {
            let message = format!("Compare {} with current minimum {}", a[j], a[min]);
            rec.frame(&a)
                .mark_range(0..i, Mark::Sorted)
                .compare_one(j)
                .mark(min, Mark::Minimum)
                .pointer(i, "i", PointerColor::Primary)
                .pointer(j, "j", PointerColor::Secondary)
                .var("i", i)
                .var("min", min)
                .var("j", j)
                .emit(message);

            if a[j] < a[min] {
                min = j;
                let message = format!("{} is the new minimum", a[min]);
                rec.frame(&a)
                    .mark_range(0..i, Mark::Sorted)
                    .mark(min, Mark::Minimum)
                    .pointer(i, "i", PointerColor::Primary)
                    .pointer(j, "j", PointerColor::Secondary)
                    .var("i", i)
                    .var_changed("min", min)
                    .var("j", j)
                    .emit(message);
            }
        }

        if min != i {
            a.swap(i, min);
            let message = format!("Swap {} into position {}", a[i], i);
            rec.frame(&a)
                .mark_range(0..i, Mark::Sorted)
                .swap(i, min)
                .var("i", i)
                .var("min", min)
                .emit(message);
        }

        let message = format!("{} is in its final position", a[i]);
        rec.frame(&a)
            .mark_range(0..i + 1, Mark::Sorted)
            .var("i", i)
            .emit(message);
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// Grow a sorted prefix by swapping each new key left into place
pub fn insertion_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(INSERTION, input, 2)?;
    let mut a = input.to_vec();
    let n = a.len();
    let mut rec = Recorder::new(input);

    for i in 1..n {
        let key = a[i];
        let message = format!("Insert {} into the sorted prefix", key);
        rec.frame(&a)
            .mark_range(0..i, Mark::Sorted)
            .mark(i, Mark::Current)
            .pointer(i, "i", PointerColor::Primary)
            .var("i", i)
            .var_changed("key", key)
            .emit(message);

        let mut j = i;
        while j > 0 {
            let message = format!("Compare {} with key {}", a[j - 1], key);
            rec.frame(&a)
                .mark_range(0..i + 1, Mark::Sorted)
                .compare(j - 1, j)
                .pointer(j, "j", PointerColor::Secondary)
                .var("i", i)
                .var("key", key)
                .var("j", j)
                .emit(message);

            if a[j - 1] <= key {
                break;
            }
            a.swap(j - 1, j);
            let message = format!("{} > {}, shift it right", a[j], key);
            rec.frame(&a)
                .mark_range(0..i + 1, Mark::Sorted)
                .swap(j - 1, j)
                .pointer(j - 1, "j", PointerColor::Secondary)
                .var("i", i)
                .var("key", key)
                .var_changed("j", j - 1)
                .emit(message);
            j -= 1;
        }

        let message = format!("{} inserted at position {}", key, j);
        rec.frame(&a)
            .mark_range(0..i + 1, Mark::Sorted)
            .mark(j, Mark::Current)
            .var("i", i)
            .var("key", key)
            .emit(message);
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// Lomuto partition quick sort.
///
/// Keys equal to the pivot go to the left side. With `pivot=middle` the middle
/// element is swapped to the end of the range first and then used as the
/// Lomuto pivot.
pub fn quick_sort(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(QUICK, input, 2)?;
    let middle = params.choice("pivot")? == "middle";

    let mut sorter = QuickSort {
        a: input.to_vec(),
        rec: Recorder::new(input),
        placed: vec![false; input.len()],
        middle,
    };
    sorter.sort(0, input.len());

    let QuickSort { a, mut rec, .. } = sorter;
    rec.frame(&a)
        .mark_range(0..a.len(), Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

struct QuickSort {
    a: Vec<i64>,
    rec: Recorder,
    /// Positions whose pivot has been placed
    placed: Vec<bool>,
    middle: bool,
}

impl QuickSort {
    fn frame(&mut self) -> Frame<'_> {
        let placed = self
            .placed
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| i);
        self.rec.frame(&self.a).mark_all(placed, Mark::Sorted)
    }

    /// Sort the half-open range `[low, end)`
    fn sort(&mut self, low: usize, end: usize) {
        match end.saturating_sub(low) {
            0 => {}
            1 => {
                self.placed[low] = true;
                let message = format!("{} alone is in its final position", self.a[low]);
                self.frame().var("low", low).var("high", low).emit(message);
            }
            _ => {
                let p = self.partition(low, end - 1);
                self.sort(low, p);
                self.sort(p + 1, end);
            }
        }
    }

    fn partition(&mut self, low: usize, high: usize) -> usize {
        if self.middle {
            let mid = low + (high - low) / 2;
            if mid != high {
                self.a.swap(mid, high);
                let aux = self.partition_aux(high, low, low, high);
                let message = format!("Move middle element {} to the end as pivot", self.a[high]);
                self.frame()
                    .mark_range(low..high + 1, Mark::Active)
                    .swap(mid, high)
                    .aux(aux)
                    .emit(message);
            }
        }

        let pivot = self.a[high];
        let mut boundary = low;
        let aux = self.partition_aux(high, boundary, low, high);
        let message = format!("Partition [{}..{}] around pivot {}", low, high, pivot);
        self.frame()
            .mark_range(low..high, Mark::Active)
            .mark(high, Mark::Pivot)
            .pointer(low, "low", PointerColor::Primary)
            .pointer(high, "high", PointerColor::Primary)
            .var("low", low)
            .var("high", high)
            .var_changed("pivot", pivot)
            .aux(aux)
            .emit(message);

        for j in low..high {
            let aux = self.partition_aux(high, boundary, low, high);
            let message = format!("Compare {} with pivot {}", self.a[j], pivot);
            self.frame()
                .compare_one(j)
                .mark(high, Mark::Pivot)
                .pointer(boundary, "i", PointerColor::Secondary)
                .pointer(j, "j", PointerColor::Accent)
                .var("pivot", pivot)
                .var("i", boundary)
                .var("j", j)
                .aux(aux)
                .emit(message);

            if self.a[j] <= pivot {
                if boundary != j {
                    self.a.swap(boundary, j);
                    let aux = self.partition_aux(high, boundary + 1, low, high);
                    let message = format!(
                        "{} <= {}, swap it into the left side",
                        self.a[boundary], pivot
                    );
                    self.frame()
                        .swap(boundary, j)
                        .mark(high, Mark::Pivot)
                        .var("pivot", pivot)
                        .var_changed("i", boundary + 1)
                        .var("j", j)
                        .aux(aux)
                        .emit(message);
                }
                boundary += 1;
            }
        }

        if boundary != high {
            self.a.swap(boundary, high);
            let aux = self.partition_aux(boundary, boundary, low, high);
            let message = format!("Move pivot {} to position {}", pivot, boundary);
            self.frame()
                .swap(boundary, high)
                .var("pivot", pivot)
                .var("i", boundary)
                .aux(aux)
                .emit(message);
        }

        self.placed[boundary] = true;
        let aux = self.partition_aux(boundary, boundary, low, high);
        let message = format!("Pivot {} is in its final position", pivot);
        self.frame()
            .mark(boundary, Mark::Pivot)
            .var("pivot", pivot)
            .var("i", boundary)
            .aux(aux)
            .emit(message);
        boundary
    }

    fn partition_aux(
        &self,
        pivot_index: usize,
        boundary: usize,
        low: usize,
        high: usize,
    ) -> AuxiliaryState {
        AuxiliaryState::Partition {
            pivot_index,
            pivot_value: self.a[pivot_index],
            boundary,
            low,
            high,
        }
    }
}

/// Top-down stable merge sort; every write back into the array counts as a swap
pub fn merge_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(MERGE, input, 2)?;
    let mut a = input.to_vec();
    let mut rec = Recorder::new(input);
    let n = a.len();

    merge_sort_range(&mut a, &mut rec, 0, n);

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

fn merge_sort_range(a: &mut [i64], rec: &mut Recorder, low: usize, end: usize) {
    if end - low < 2 {
        return;
    }
    let mid = low + (end - low) / 2;
    rec.frame(a)
        .mark_range(low..end, Mark::Active)
        .pointer(low, "low", PointerColor::Primary)
        .pointer(mid, "mid", PointerColor::Secondary)
        .var("low", low)
        .var("mid", mid)
        .var("high", end - 1)
        .emit(format!("Split [{}..{}] at {}", low, end - 1, mid));

    merge_sort_range(a, rec, low, mid);
    merge_sort_range(a, rec, mid, end);
    merge_runs(a, rec, low, mid, end);
}

fn merge_runs(a: &mut [i64], rec: &mut Recorder, low: usize, mid: usize, end: usize) {
    let left = a[low..mid].to_vec();
    let right = a[mid..end].to_vec();
    let mut merged = Vec::with_capacity(end - low);
    let aux = |merged: &Vec<i64>| AuxiliaryState::Merge {
        left: left.clone(),
        right: right.clone(),
        merged: merged.clone(),
        start: low,
        end,
    };

    rec.frame(a)
        .mark_range(low..end, Mark::Active)
        .aux(aux(&merged))
        .emit(format!(
            "Merge [{}..{}] with [{}..{}]",
            low,
            mid - 1,
            mid,
            end - 1
        ));

    let (mut i, mut j) = (0, 0);
    while i < left.len() || j < right.len() {
        let k = low + merged.len();
        let take_left = if i < left.len() && j < right.len() {
            rec.frame(a)
                .mark_range(low..end, Mark::Active)
                .count_comparisons(1)
                .mark(k, Mark::Current)
                .var("left", left[i])
                .var("right", right[j])
                .aux(aux(&merged))
                .emit(format!("Compare {} with {}", left[i], right[j]));
            // Ties take from the left half to stay stable
            left[i] <= right[j]
        } else {
            i < left.len()
        };

        let value = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        a[k] = value;
        merged.push(value);
        rec.frame(a)
            .mark_range(low..end, Mark::Active)
            .write(k)
            .var("k", k)
            .aux(aux(&merged))
            .emit(format!("Write {} to position {}", value, k));
    }

    rec.frame(a)
        .mark_range(low..end, Mark::Active)
        .aux(aux(&merged))
        .emit(format!("[{}..{}] is merged", low, end - 1));
}

/// In-place heap sort on a max-heap
pub fn heap_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(HEAP, input, 2)?;
    let mut heap = HeapSort {
        a: input.to_vec(),
        rec: Recorder::new(input),
        size: input.len(),
    };
    let n = input.len();

    heap.frame(false).emit("Build a max-heap");
    for root in (0..n / 2).rev() {
        heap.sift_down(root);
    }
    heap.frame(false).emit("Max-heap built");

    for end in (1..n).rev() {
        let message = format!("Remove maximum {} from the root", heap.a[0]);
        let size = heap.size;
        heap.frame(true)
            .mark(0, Mark::Current)
            .var("heapSize", size)
            .emit(message);

        heap.a.swap(0, end);
        heap.size = end;
        let message = format!("Swap {} to position {}", heap.a[end], end);
        heap.frame(true)
            .swap(0, end)
            .var_changed("heapSize", end)
            .emit(message);

        heap.sift_down(0);
    }

    let HeapSort { a, mut rec, .. } = heap;
    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .aux(AuxiliaryState::Heap {
            nodes: a.clone(),
            heap_size: 0,
            removing: false,
        })
        .emit("Array is sorted");
    Ok(rec.finish())
}

struct HeapSort {
    a: Vec<i64>,
    rec: Recorder,
    /// `a[..size]` is the heap, `a[size..]` is sorted
    size: usize,
}

impl HeapSort {
    fn frame(&mut self, removing: bool) -> Frame<'_> {
        let n = self.a.len();
        let aux = AuxiliaryState::Heap {
            nodes: self.a.clone(),
            heap_size: self.size,
            removing,
        };
        self.rec
            .frame(&self.a)
            .mark_range(self.size..n, Mark::Sorted)
            .aux(aux)
    }

    fn sift_down(&mut self, mut root: usize) {
        loop {
            let left = 2 * root + 1;
            if left >= self.size {
                break;
            }
            let right = left + 1;
            let size = self.size;
            let mut largest = root;

            let message = format!("Compare {} with left child {}", self.a[largest], self.a[left]);
            self.frame(false)
                .compare(largest, left)
                .var("root", root)
                .var("heapSize", size)
                .emit(message);
            if self.a[left] > self.a[largest] {
                largest = left;
            }

            if right < self.size {
                let message = format!("Compare {} with right child {}", self.a[largest], self.a[right]);
                self.frame(false)
                    .compare(largest, right)
                    .var("root", root)
                    .var("largest", largest)
                    .var("heapSize", size)
                    .emit(message);
                if self.a[right] > self.a[largest] {
                    largest = right;
                }
            }

            if largest == root {
                let message = format!("{} is larger than its children", self.a[root]);
                self.frame(false)
                    .mark(root, Mark::Current)
                    .var("root", root)
                    .emit(message);
                break;
            }

            self.a.swap(root, largest);
            let message = format!("Sift {} down to position {}", self.a[largest], largest);
            self.frame(false)
                .swap(root, largest)
                .var("root", root)
                .var_changed("largest", largest)
                .emit(message);
            root = largest;
        }
    }
}

/// Gapped insertion sort over a shrinking gap sequence
pub fn shell_sort(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(SHELL, input, 2)?;
    let mut a = input.to_vec();
    let n = a.len();
    let sequence = match params.choice("gaps")? {
        "knuth" => knuth_gaps(n),
        _ => shell_gaps(n),
    };
    let mut rec = Recorder::new(input);
    let aux = |gap: usize| AuxiliaryState::Gap {
        gap,
        sequence: sequence.clone(),
    };

    for &gap in &sequence {
        rec.frame(&a)
            .var_changed("gap", gap)
            .aux(aux(gap))
            .emit(format!("Sort elements {} apart", gap));

        for i in gap..n {
            let mut j = i;
            while j >= gap {
                let message = format!("Compare {} with {}", a[j - gap], a[j]);
                rec.frame(&a)
                    .compare(j - gap, j)
                    .pointer(j, "j", PointerColor::Primary)
                    .var("gap", gap)
                    .var("i", i)
                    .var("j", j)
                    .aux(aux(gap))
                    .emit(message);

                if a[j - gap] <= a[j] {
                    break;
                }
                a.swap(j - gap, j);
                let message = format!("Swap {} and {}", a[j], a[j - gap]);
                rec.frame(&a)
                    .swap(j - gap, j)
                    .var("gap", gap)
                    .var("i", i)
                    .var_changed("j", j - gap)
                    .aux(aux(gap))
                    .emit(message);
                j -= gap;
            }
        }
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .aux(aux(1))
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// n/2, n/4, …, 1
fn shell_gaps(n: usize) -> Vec<usize> {
    let mut gaps = Vec::new();
    let mut gap = n / 2;
    while gap > 0 {
        gaps.push(gap);
        gap /= 2;
    }
    gaps
}

/// Knuth's 1, 4, 13, 40, … below n, largest first
fn knuth_gaps(n: usize) -> Vec<usize> {
    let mut gaps = vec![1];
    while gaps[gaps.len() - 1] * 3 + 1 < n {
        let next = gaps[gaps.len() - 1] * 3 + 1;
        gaps.push(next);
    }
    gaps.reverse();
    gaps
}

/// Simplified Timsort: insertion-sort fixed-size runs, then merge them pairwise
pub fn tim_sort(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(TIM, input, 2)?;
    let min_run = usize::try_from(params.number("minRun")?).unwrap_or(1).max(1);
    let mut a = input.to_vec();
    let n = a.len();
    let mut rec = Recorder::new(input);

    let mut runs: Vec<Run> = (0..n)
        .step_by(min_run)
        .map(|start| Run {
            start,
            end: (start + min_run).min(n),
        })
        .collect();
    let aux = |runs: &[Run], active: Option<usize>| AuxiliaryState::Runs {
        runs: runs.to_vec(),
        min_run,
        active,
    };

    rec.frame(&a)
        .var("minRun", min_run)
        .aux(aux(&runs, None))
        .emit(format!("Split into {} run(s) of up to {}", runs.len(), min_run));

    for (r, run) in runs.iter().enumerate() {
        for i in run.start + 1..run.end {
            let mut j = i;
            while j > run.start {
                let message = format!("Compare {} with {}", a[j - 1], a[j]);
                rec.frame(&a)
                    .mark_range(run.start..run.end, Mark::Active)
                    .compare(j - 1, j)
                    .var("run", r)
                    .var("j", j)
                    .aux(aux(&runs, Some(r)))
                    .emit(message);
                if a[j - 1] <= a[j] {
                    break;
                }
                a.swap(j - 1, j);
                let message = format!("Swap {} and {}", a[j], a[j - 1]);
                rec.frame(&a)
                    .mark_range(run.start..run.end, Mark::Active)
                    .swap(j - 1, j)
                    .var("run", r)
                    .var_changed("j", j - 1)
                    .aux(aux(&runs, Some(r)))
                    .emit(message);
                j -= 1;
            }
        }
        rec.frame(&a)
            .mark_range(run.start..run.end, Mark::Active)
            .var("run", r)
            .aux(aux(&runs, Some(r)))
            .emit(format!("Run {} is sorted", r));
    }

    while runs.len() > 1 {
        let mut merged_runs = Vec::with_capacity(runs.len().div_ceil(2));
        for pair in runs.chunks(2) {
            match pair {
                [left, right] => {
                    let index = merged_runs.len();
                    merge_adjacent_runs(&mut a, &mut rec, *left, *right, |active| {
                        let mut view = merged_runs.clone();
                        view.push(Run {
                            start: left.start,
                            end: right.end,
                        });
                        view.extend(
                            runs.iter()
                                .filter(|run| run.start >= right.end)
                                .copied(),
                        );
                        aux(&view, active.then_some(index))
                    });
                    merged_runs.push(Run {
                        start: left.start,
                        end: right.end,
                    });
                }
                [single] => merged_runs.push(*single),
                _ => {}
            }
        }
        runs = merged_runs;
        rec.frame(&a)
            .aux(aux(&runs, None))
            .emit(format!("{} run(s) remain", runs.len()));
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .aux(aux(&runs, None))
        .emit("Array is sorted");
    Ok(rec.finish())
}

fn merge_adjacent_runs<F>(a: &mut [i64], rec: &mut Recorder, left: Run, right: Run, aux: F)
where
    F: Fn(bool) -> AuxiliaryState,
{
    let left_values = a[left.start..left.end].to_vec();
    let right_values = a[right.start..right.end].to_vec();
    let (low, end) = (left.start, right.end);

    rec.frame(a)
        .mark_range(low..end, Mark::Active)
        .aux(aux(true))
        .emit(format!(
            "Merge runs [{}..{}] and [{}..{}]",
            left.start,
            left.end - 1,
            right.start,
            right.end - 1
        ));

    let (mut i, mut j, mut k) = (0, 0, low);
    while i < left_values.len() || j < right_values.len() {
        let take_left = if i < left_values.len() && j < right_values.len() {
            rec.frame(a)
                .mark_range(low..end, Mark::Active)
                .count_comparisons(1)
                .mark(k, Mark::Current)
                .aux(aux(true))
                .emit(format!(
                    "Compare {} with {}",
                    left_values[i], right_values[j]
                ));
            left_values[i] <= right_values[j]
        } else {
            i < left_values.len()
        };

        let value = if take_left {
            i += 1;
            left_values[i - 1]
        } else {
            j += 1;
            right_values[j - 1]
        };
        a[k] = value;
        rec.frame(a)
            .mark_range(low..end, Mark::Active)
            .write(k)
            .aux(aux(true))
            .emit(format!("Write {} to position {}", value, k));
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{assert_sorted_terminal, assert_well_formed};
    use crate::algorithms::GenerateFn;

    const ALL: [(&str, GenerateFn); 8] = [
        ("bubble", bubble_sort),
        ("selection", selection_sort),
        ("insertion", insertion_sort),
        ("quick", quick_sort),
        ("merge", merge_sort),
        ("heap", heap_sort),
        ("shell", shell_sort),
        ("tim", tim_sort),
    ];

    fn default_params() -> Params {
        Params::new()
            .with_choice("pivot", "last")
            .with_choice("gaps", "shell")
            .with_number("minRun", 4)
    }

    #[test]
    fn test_all_sorts_sort() {
        let inputs: [&[i64]; 5] = [
            &[5, 2, 4, 1],
            &[1, 2],
            &[2, 1],
            &[3, 3, 1, 3, 2, 2],
            &[9, -4, 0, 17, -4, 8, 3, 12, 5, 1],
        ];
        for (name, generate) in ALL {
            for input in inputs {
                let trace = generate(input, &default_params())
                    .unwrap_or_else(|e| panic!("{} failed: {}", name, e));
                assert_well_formed(&trace, input, true);
                assert_sorted_terminal(&trace, input);
            }
        }
    }

    #[test]
    fn test_single_element_rejected() {
        for (name, generate) in ALL {
            let err = generate(&[7], &default_params()).unwrap_err();
            assert!(
                matches!(err, ValidationError::TooFewElements { min: 2, got: 1, .. }),
                "{} accepted a single element",
                name
            );
        }
    }

    #[test]
    fn test_selection_sort_grows_sorted_prefix() {
        let trace = selection_sort(&[3, 1, 2], &Params::new()).unwrap();
        let settled: Vec<Vec<usize>> = trace
            .iter()
            .filter(|s| s.message.ends_with("final position"))
            .map(|s| s.indices_marked(Mark::Sorted))
            .collect();
        assert_eq!(settled, vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn test_extreme_values_sort() {
        let input = [i64::MAX, i64::MIN, 0, i64::MAX - 1, -1, i64::MIN + 1];
        for (name, generate) in ALL {
            let trace = generate(&input, &default_params())
                .unwrap_or_else(|e| panic!("{} failed: {}", name, e));
            assert_well_formed(&trace, &input, true);
            assert_sorted_terminal(&trace, &input);
        }
    }

    #[test]
    fn test_bubble_sort_first_steps() {
        let trace = bubble_sort(&[5, 2, 4, 1], &Params::new()).unwrap();

        let first = trace.get(1).unwrap();
        assert_eq!(first.indices_marked(Mark::Comparing), vec![0, 1]);
        assert_eq!(first.metrics.comparisons, 1);

        let swap = trace.get(2).unwrap();
        assert_eq!(swap.array_state, vec![2, 5, 4, 1]);
        assert_eq!(swap.metrics.swaps, 1);
        assert_eq!(swap.indices_marked(Mark::Swapping), vec![0, 1]);
    }

    #[test]
    fn test_bubble_sort_early_exit_on_sorted_input() {
        let trace = bubble_sort(&[1, 2, 3, 4], &Params::new()).unwrap();
        let last = trace.terminal();
        assert_eq!(last.metrics.comparisons, 3);
        assert_eq!(last.metrics.swaps, 0);
    }

    #[test]
    fn test_quick_sort_partition_payload() {
        let trace = quick_sort(&[3, 7, 1, 5], &default_params()).unwrap();
        let first = trace.get(1).unwrap();
        match &first.auxiliary_state {
            Some(AuxiliaryState::Partition {
                pivot_index,
                pivot_value,
                boundary,
                low,
                high,
            }) => {
                assert_eq!((*pivot_index, *pivot_value), (3, 5));
                assert_eq!((*boundary, *low, *high), (0, 0, 3));
            }
            other => panic!("expected partition payload, got {:?}", other),
        }
        assert_eq!(first.mark_at(3), Some(Mark::Pivot));
    }

    #[test]
    fn test_quick_sort_middle_pivot() {
        let params = default_params().with_choice("pivot", "middle");
        let input = [8, 3, 6, 1, 9, 2];
        let trace = quick_sort(&input, &params).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_sorted_terminal(&trace, &input);
        // mid of [0..5] is 2, so 6 moves to the end first
        assert_eq!(trace.get(1).unwrap().array_state, vec![8, 3, 2, 1, 9, 6]);
    }

    #[test]
    fn test_merge_sort_payload_tracks_halves() {
        let trace = merge_sort(&[4, 1], &Params::new()).unwrap();
        let merge_start = trace
            .iter()
            .find(|s| matches!(s.auxiliary_state, Some(AuxiliaryState::Merge { .. })))
            .unwrap();
        assert_eq!(
            merge_start.auxiliary_state,
            Some(AuxiliaryState::Merge {
                left: vec![4],
                right: vec![1],
                merged: vec![],
                start: 0,
                end: 2,
            })
        );
    }

    #[test]
    fn test_heap_sort_reports_heap_size() {
        let trace = heap_sort(&[2, 9, 4, 7], &Params::new()).unwrap();
        let removing: Vec<_> = trace
            .iter()
            .filter_map(|s| match &s.auxiliary_state {
                Some(AuxiliaryState::Heap {
                    heap_size,
                    removing: true,
                    ..
                }) => Some(*heap_size),
                _ => None,
            })
            .collect();
        assert!(!removing.is_empty());
        assert!(removing.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_gap_sequences() {
        assert_eq!(shell_gaps(10), vec![5, 2, 1]);
        assert_eq!(knuth_gaps(10), vec![4, 1]);
        assert_eq!(knuth_gaps(2), vec![1]);
        assert_eq!(knuth_gaps(14), vec![13, 4, 1]);
    }

    #[test]
    fn test_tim_sort_run_layout() {
        let trace = tim_sort(&[6, 5, 4, 3, 2, 1, 0], &default_params()).unwrap();
        match &trace.get(1).unwrap().auxiliary_state {
            Some(AuxiliaryState::Runs { runs, min_run, .. }) => {
                assert_eq!(*min_run, 4);
                assert_eq!(
                    runs,
                    &vec![Run { start: 0, end: 4 }, Run { start: 4, end: 7 }]
                );
            }
            other => panic!("expected runs payload, got {:?}", other),
        }
    }
}
