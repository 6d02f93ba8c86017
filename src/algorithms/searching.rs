//! Search variants
//!
//! Each search records one frame per probe and, where a region is ruled out,
//! one frame showing the narrowed range. The terminal frame carries a
//! `search` result (`None` when the target is absent), except for the pair
//! sum which reports `indices`.

use super::{require_len, require_sorted};
use crate::errors::ValidationError;
use crate::recorder::{Frame, Recorder};
use crate::registry::Params;
use crate::snapshot::{Mark, PointerColor, Trace, TraceResult, VarValue};

const LINEAR: &str = "Linear search";
const BINARY: &str = "Binary search";
const JUMP: &str = "Jump search";
const PAIR_SUM: &str = "Two-pointer pair sum";

/// Scan left to right; the first occurrence wins
pub fn linear_search(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(LINEAR, input, 1)?;
    let target = params.number("target")?;
    let mut rec = Recorder::new(input);

    for (i, &value) in input.iter().enumerate() {
        rec.frame(input)
            .mark_range(0..i, Mark::Eliminated)
            .compare_one(i)
            .pointer(i, "i", PointerColor::Primary)
            .var("target", target)
            .var_changed("i", i)
            .emit(format!("Compare {} with target {}", value, target));

        if value == target {
            rec.frame(input)
                .mark_range(0..i, Mark::Eliminated)
                .mark(i, Mark::Found)
                .pointer(i, "i", PointerColor::Success)
                .var("target", target)
                .var("i", i)
                .result(TraceResult::Search(Some(i)))
                .emit(format!("Found {} at index {}", target, i));
            return Ok(rec.finish());
        }
    }

    rec.frame(input)
        .mark_range(0..input.len(), Mark::Eliminated)
        .var("target", target)
        .result(TraceResult::Search(None))
        .emit(format!("{} is not in the array", target));
    Ok(rec.finish())
}

/// Classic binary search over `[low, high]` with `mid = low + (high - low) / 2`.
///
/// With duplicates, whichever equal element is probed first is reported.
pub fn binary_search(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(BINARY, input, 1)?;
    require_sorted(BINARY, input)?;
    let target = params.number("target")?;
    let mut rec = Recorder::new(input);

    let mut low: i64 = 0;
    let mut high: i64 = input.len() as i64 - 1;

    range_frame(&mut rec, input, low, high)
        .pointer(low as usize, "low", PointerColor::Primary)
        .pointer(high as usize, "high", PointerColor::Primary)
        .var("target", target)
        .var("low", low)
        .var("high", high)
        .emit(format!("Search for {} in [{}, {}]", target, low, high));

    while low <= high {
        let mid = low + (high - low) / 2;
        let value = input[mid as usize];
        let relation = match value.cmp(&target) {
            std::cmp::Ordering::Less => "<",
            std::cmp::Ordering::Greater => ">",
            std::cmp::Ordering::Equal => "=",
        };
        range_frame(&mut rec, input, low, high)
            .compare_one(mid as usize)
            .pointer(low as usize, "low", PointerColor::Primary)
            .pointer(mid as usize, "mid", PointerColor::Accent)
            .pointer(high as usize, "high", PointerColor::Primary)
            .var("target", target)
            .var("low", low)
            .var("high", high)
            .var_changed("mid", mid)
            .emit(format!("a[{}] = {} {} {}", mid, value, relation, target));

        if value == target {
            range_frame(&mut rec, input, low, high)
                .mark(mid as usize, Mark::Found)
                .pointer(mid as usize, "mid", PointerColor::Success)
                .var("target", target)
                .var("low", low)
                .var("high", high)
                .var("mid", mid)
                .result(TraceResult::Search(Some(mid as usize)))
                .emit(format!("Found {} at index {}", target, mid));
            return Ok(rec.finish());
        }

        let (old_low, old_high) = (low, high);
        let moved_low = value < target;
        let message = if moved_low {
            low = mid + 1;
            format!("{} < {}: discard [{}, {}], low = {}", value, target, old_low, mid, low)
        } else {
            high = mid - 1;
            format!("{} > {}: discard [{}, {}], high = {}", value, target, mid, old_high, high)
        };
        let frame = range_frame(&mut rec, input, low, high).var("target", target);
        let mut frame = if moved_low {
            frame.var_changed("low", low).var("high", high)
        } else {
            frame.var("low", low).var_changed("high", high)
        };
        if low <= high {
            frame = frame
                .pointer(low as usize, "low", PointerColor::Primary)
                .pointer(high as usize, "high", PointerColor::Primary);
        }
        frame.emit(message);
    }

    rec.frame(input)
        .mark_range(0..input.len(), Mark::Eliminated)
        .var("target", target)
        .var("low", low)
        .var("high", high)
        .result(TraceResult::Search(None))
        .emit(format!("Range is empty, {} is not in the array", target));
    Ok(rec.finish())
}

/// Frame with everything outside `[low, high]` eliminated and the rest active
fn range_frame<'r>(rec: &'r mut Recorder, input: &[i64], low: i64, high: i64) -> Frame<'r> {
    let n = input.len();
    let outside = (0..n).filter(move |&i| (i as i64) < low || (i as i64) > high);
    let inside = (0..n).filter(move |&i| (i as i64) >= low && (i as i64) <= high);
    rec.frame(input)
        .mark_all(outside, Mark::Eliminated)
        .mark_all(inside, Mark::Active)
}

/// Probe block ends `⌊√n⌋` apart, then scan the one block that can hold the target
pub fn jump_search(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(JUMP, input, 1)?;
    require_sorted(JUMP, input)?;
    let target = params.number("target")?;
    let n = input.len();
    let block = isqrt(n).max(1);
    let mut rec = Recorder::new(input);

    rec.frame(input)
        .var("target", target)
        .var("block", block)
        .emit(format!("Jump in blocks of {}", block));

    let mut prev = 0;
    let mut next = block;
    loop {
        let probe = next.min(n) - 1;
        rec.frame(input)
            .mark_range(0..prev, Mark::Eliminated)
            .compare_one(probe)
            .pointer(prev, "prev", PointerColor::Primary)
            .pointer(probe, "probe", PointerColor::Accent)
            .var("target", target)
            .var("prev", prev)
            .var_changed("probe", probe)
            .emit(format!("Compare block end {} with target {}", input[probe], target));

        if input[probe] >= target {
            break;
        }
        prev = next;
        if prev >= n {
            rec.frame(input)
                .mark_range(0..n, Mark::Eliminated)
                .var("target", target)
                .result(TraceResult::Search(None))
                .emit(format!("Every block ends below {}, not found", target));
            return Ok(rec.finish());
        }
        rec.frame(input)
            .mark_range(0..prev, Mark::Eliminated)
            .pointer(prev, "prev", PointerColor::Primary)
            .var("target", target)
            .var_changed("prev", prev)
            .emit(format!("{} < {}, jump to the next block", input[probe], target));
        next += block;
    }

    let end = next.min(n);
    for i in prev..end {
        rec.frame(input)
            .mark_range(0..i, Mark::Eliminated)
            .compare_one(i)
            .pointer(i, "i", PointerColor::Primary)
            .var("target", target)
            .var_changed("i", i)
            .emit(format!("Compare {} with target {}", input[i], target));

        if input[i] == target {
            rec.frame(input)
                .mark_range(0..i, Mark::Eliminated)
                .mark(i, Mark::Found)
                .var("target", target)
                .var("i", i)
                .result(TraceResult::Search(Some(i)))
                .emit(format!("Found {} at index {}", target, i));
            return Ok(rec.finish());
        }
        if input[i] > target {
            break;
        }
    }

    rec.frame(input)
        .mark_range(0..n, Mark::Eliminated)
        .var("target", target)
        .result(TraceResult::Search(None))
        .emit(format!("{} is not in the array", target));
    Ok(rec.finish())
}

fn isqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Find `a[i] + a[j] == target` in sorted input by closing two pointers inward
pub fn two_pointer_sum(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(PAIR_SUM, input, 2)?;
    require_sorted(PAIR_SUM, input)?;
    let target = params.number("target")?;
    let mut rec = Recorder::new(input);
    let (mut i, mut j) = (0, input.len() - 1);

    while i < j {
        let sum = i128::from(input[i]) + i128::from(input[j]);
        let verdict = match sum.cmp(&i128::from(target)) {
            std::cmp::Ordering::Less => "too small, move left pointer",
            std::cmp::Ordering::Greater => "too large, move right pointer",
            std::cmp::Ordering::Equal => "match",
        };
        rec.frame(input)
            .mark_range(0..i, Mark::Eliminated)
            .mark_range(j + 1..input.len(), Mark::Eliminated)
            .compare(i, j)
            .pointer(i, "left", PointerColor::Primary)
            .pointer(j, "right", PointerColor::Secondary)
            .var("target", target)
            .var_changed("sum", wide(sum))
            .emit(format!("{} + {} = {}: {}", input[i], input[j], sum, verdict));

        match sum.cmp(&i128::from(target)) {
            std::cmp::Ordering::Equal => {
                rec.frame(input)
                    .mark(i, Mark::Match)
                    .mark(j, Mark::Match)
                    .var("target", target)
                    .var("sum", wide(sum))
                    .result(TraceResult::Indices(vec![i, j]))
                    .emit(format!("Pair found at indices {} and {}", i, j));
                return Ok(rec.finish());
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j -= 1,
        }
    }

    rec.frame(input)
        .mark_range(0..input.len(), Mark::Eliminated)
        .var("target", target)
        .result(TraceResult::Indices(Vec::new()))
        .emit(format!("No pair sums to {}", target));
    Ok(rec.finish())
}

/// Pair sums can leave the `i64` range; those are shown as text
fn wide(sum: i128) -> VarValue {
    i64::try_from(sum).map_or_else(|_| VarValue::Text(sum.to_string()), VarValue::Int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::assert_well_formed;
    use crate::snapshot::VarValue;

    fn target(t: i64) -> Params {
        Params::new().with_number("target", t)
    }

    const ODDS: [i64; 10] = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

    fn int_var(trace: &Trace, step: usize, name: &str) -> Option<i64> {
        match trace.get(step)?.variable(name)?.value {
            VarValue::Int(v) => Some(v),
            _ => None,
        }
    }

    #[test]
    fn test_binary_search_narrows_to_match() {
        let trace = binary_search(&ODDS, &target(13)).unwrap();
        assert_well_formed(&trace, &ODDS, true);

        let probes: Vec<usize> = trace
            .iter()
            .filter(|s| s.metrics.comparisons > 0)
            .filter_map(|s| s.indices_marked(Mark::Comparing).first().copied())
            .collect();
        assert_eq!(probes, vec![4, 7, 5, 6]);

        // range frame, then (compare, eliminate) x3, compare, found
        assert_eq!(trace.total_steps(), 1 + 2 * 3 + 2);
        assert_eq!(int_var(&trace, 1, "low"), Some(0));
        assert_eq!(int_var(&trace, 1, "high"), Some(9));
        assert_eq!(int_var(&trace, 3, "low"), Some(5));
        assert_eq!(int_var(&trace, 5, "high"), Some(6));
        assert_eq!(int_var(&trace, 7, "low"), Some(6));

        let last = trace.terminal();
        assert_eq!(last.result, Some(TraceResult::Search(Some(6))));
        assert_eq!(last.mark_at(6), Some(Mark::Found));
        assert_eq!(last.metrics.comparisons, 4);
    }

    #[test]
    fn test_binary_search_eliminated_regions() {
        let trace = binary_search(&ODDS, &target(13)).unwrap();
        let after_first = trace.get(3).unwrap();
        assert_eq!(
            after_first.indices_marked(Mark::Eliminated),
            vec![0, 1, 2, 3, 4]
        );
        let after_second = trace.get(5).unwrap();
        assert_eq!(
            after_second.indices_marked(Mark::Eliminated),
            vec![0, 1, 2, 3, 4, 7, 8, 9]
        );
    }

    #[test]
    fn test_binary_search_missing_target() {
        for missing in [0, 4, 20] {
            let trace = binary_search(&ODDS, &target(missing)).unwrap();
            assert_well_formed(&trace, &ODDS, true);
            assert_eq!(trace.result(), Some(&TraceResult::Search(None)));
        }
    }

    #[test]
    fn test_binary_search_requires_sorted_input() {
        assert!(matches!(
            binary_search(&[3, 1, 2], &target(1)),
            Err(ValidationError::Unsorted { index: 1, .. })
        ));
    }

    #[test]
    fn test_missing_target_param() {
        assert_eq!(
            linear_search(&[1, 2], &Params::new()).unwrap_err(),
            ValidationError::MissingParam("target".to_string())
        );
    }

    #[test]
    fn test_linear_search_first_occurrence() {
        let trace = linear_search(&[4, 8, 8, 1], &target(8)).unwrap();
        assert_eq!(trace.result(), Some(&TraceResult::Search(Some(1))));
        assert_eq!(trace.terminal().metrics.comparisons, 2);
    }

    #[test]
    fn test_jump_search() {
        let input: Vec<i64> = (0..16).map(|i| i * 2).collect();
        let cases = [
            (0, Some(0)),
            (14, Some(7)),
            (30, Some(15)),
            (15, None),
            (99, None),
        ];
        for (t, expected) in cases {
            let trace = jump_search(&input, &target(t)).unwrap();
            assert_well_formed(&trace, &input, true);
            assert_eq!(
                trace.result(),
                Some(&TraceResult::Search(expected)),
                "target {}",
                t
            );
        }
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
    }

    #[test]
    fn test_two_pointer_sum() {
        let input = [1, 2, 4, 7, 11, 15];
        let trace = two_pointer_sum(&input, &target(15)).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_eq!(trace.result(), Some(&TraceResult::Indices(vec![2, 4])));

        let trace = two_pointer_sum(&input, &target(100)).unwrap();
        assert_eq!(trace.result(), Some(&TraceResult::Indices(vec![])));
    }

    #[test]
    fn test_two_pointer_sum_near_i64_limits() {
        let input = [i64::MAX - 1, i64::MAX];
        let trace = two_pointer_sum(&input, &target(0)).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_eq!(trace.result(), Some(&TraceResult::Indices(vec![])));
        let sum = trace.get(1).unwrap().variable("sum").unwrap();
        assert_eq!(
            sum.value,
            VarValue::Text("18446744073709551613".to_string())
        );

        let input = [i64::MIN, -5, i64::MAX];
        let trace = two_pointer_sum(&input, &target(-1)).unwrap();
        assert_eq!(trace.result(), Some(&TraceResult::Indices(vec![0, 2])));
        assert_eq!(
            trace.terminal().variable("sum").unwrap().value,
            VarValue::Int(-1)
        );
    }
}
