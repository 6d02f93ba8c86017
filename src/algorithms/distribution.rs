//! Non-comparison sorts
//!
//! Values are distributed into an auxiliary structure and written back.
//! Writes into the main array count as swaps; these sorts record no
//! comparisons except bucket sort's in-bucket insertion sort.

use super::{require_len, require_value_range};
use crate::config::{MAX_COUNTING_VALUE, MAX_DISTRIBUTION_VALUE};
use crate::errors::ValidationError;
use crate::recorder::Recorder;
use crate::registry::Params;
use crate::snapshot::{AuxiliaryState, Mark, PointerColor, Trace};

const COUNTING: &str = "Counting sort";
const RADIX: &str = "Radix sort";
const BUCKET: &str = "Bucket sort";

/// Tally each value, then rewrite the array from the tallies
pub fn counting_sort(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(COUNTING, input, 2)?;
    require_value_range(COUNTING, input, MAX_COUNTING_VALUE)?;

    let mut a = input.to_vec();
    let n = a.len();
    let (min, max) = min_max(&a);
    let offset = min;
    let mut counts = vec![0usize; (max - min) as usize + 1];
    let mut rec = Recorder::new(input);

    rec.frame(&a)
        .var("min", min)
        .var("max", max)
        .aux(AuxiliaryState::Count {
            counts: counts.clone(),
            offset,
            active: None,
        })
        .emit(format!("Allocate {} counters for {}..={}", counts.len(), min, max));

    for i in 0..n {
        let slot = (a[i] - offset) as usize;
        counts[slot] += 1;
        rec.frame(&a)
            .mark(i, Mark::Current)
            .pointer(i, "i", PointerColor::Primary)
            .var("i", i)
            .var_changed("count", counts[slot])
            .aux(AuxiliaryState::Count {
                counts: counts.clone(),
                offset,
                active: Some(slot),
            })
            .emit(format!("Count {}: seen {} time(s)", a[i], counts[slot]));
    }

    let mut k = 0;
    for slot in 0..counts.len() {
        let value = offset + slot as i64;
        while counts[slot] > 0 {
            counts[slot] -= 1;
            a[k] = value;
            rec.frame(&a)
                .mark_range(0..k, Mark::Sorted)
                .write(k)
                .var("k", k)
                .aux(AuxiliaryState::Count {
                    counts: counts.clone(),
                    offset,
                    active: Some(slot),
                })
                .emit(format!("Write {} to position {}", value, k));
            k += 1;
        }
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .aux(AuxiliaryState::Count {
            counts,
            offset,
            active: None,
        })
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// Least-significant-digit radix sort in base 2, 10 or 16
pub fn radix_sort(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(RADIX, input, 2)?;
    require_value_range(RADIX, input, MAX_DISTRIBUTION_VALUE)?;
    let base: i64 = match params.choice("base")? {
        "2" => 2,
        "16" => 16,
        _ => 10,
    };

    let mut a = input.to_vec();
    let n = a.len();
    let (_, max) = min_max(&a);
    let mut rec = Recorder::new(input);
    let mut exp = 1i64;
    let mut digit = 0u32;

    while max / exp > 0 {
        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); base as usize];
        rec.frame(&a)
            .var("base", base)
            .var_changed("exp", exp)
            .aux(AuxiliaryState::Buckets {
                buckets: buckets.clone(),
                active_bucket: None,
                digit: Some(digit),
            })
            .emit(format!("Distribute by digit {} (place value {})", digit, exp));

        for i in 0..n {
            let b = ((a[i] / exp) % base) as usize;
            buckets[b].push(a[i]);
            rec.frame(&a)
                .mark(i, Mark::Current)
                .pointer(i, "i", PointerColor::Primary)
                .var("exp", exp)
                .var_changed("digit", b)
                .aux(AuxiliaryState::Buckets {
                    buckets: buckets.clone(),
                    active_bucket: Some(b),
                    digit: Some(digit),
                })
                .emit(format!("{} goes to bucket {}", a[i], b));
        }

        let mut k = 0;
        for b in 0..buckets.len() {
            for j in 0..buckets[b].len() {
                let value = buckets[b][j];
                a[k] = value;
                rec.frame(&a)
                    .write(k)
                    .var("exp", exp)
                    .var("k", k)
                    .aux(AuxiliaryState::Buckets {
                        buckets: buckets.clone(),
                        active_bucket: Some(b),
                        digit: Some(digit),
                    })
                    .emit(format!("Collect {} from bucket {} into position {}", value, b, k));
                k += 1;
            }
        }

        exp *= base;
        digit += 1;
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .emit("Array is sorted");
    Ok(rec.finish())
}

/// Scatter into equal-width value ranges, insertion-sort each bucket, gather
pub fn bucket_sort(input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
    require_len(BUCKET, input, 2)?;
    require_value_range(BUCKET, input, MAX_DISTRIBUTION_VALUE)?;
    let bucket_count = usize::try_from(params.number("buckets")?).unwrap_or(1).max(1);

    let mut a = input.to_vec();
    let n = a.len();
    let (min, max) = min_max(&a);
    let span = (max - min + 1) as usize;
    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); bucket_count];
    let mut rec = Recorder::new(input);
    let aux = |buckets: &Vec<Vec<i64>>, active: Option<usize>| AuxiliaryState::Buckets {
        buckets: buckets.clone(),
        active_bucket: active,
        digit: None,
    };

    rec.frame(&a)
        .var("min", min)
        .var("max", max)
        .var("buckets", bucket_count)
        .aux(aux(&buckets, None))
        .emit(format!("Split {}..={} into {} bucket(s)", min, max, bucket_count));

    for i in 0..n {
        let b = (a[i] - min) as usize * bucket_count / span;
        buckets[b].push(a[i]);
        rec.frame(&a)
            .mark(i, Mark::Current)
            .pointer(i, "i", PointerColor::Primary)
            .var_changed("bucket", b)
            .aux(aux(&buckets, Some(b)))
            .emit(format!("{} goes to bucket {}", a[i], b));
    }

    for b in 0..bucket_count {
        for i in 1..buckets[b].len() {
            let mut j = i;
            while j > 0 {
                let (left, right) = (buckets[b][j - 1], buckets[b][j]);
                rec.frame(&a)
                    .count_comparisons(1)
                    .var("bucket", b)
                    .var("j", j)
                    .aux(aux(&buckets, Some(b)))
                    .emit(format!("Bucket {}: compare {} with {}", b, left, right));
                if left <= right {
                    break;
                }
                buckets[b].swap(j - 1, j);
                rec.frame(&a)
                    .count_swaps(1)
                    .var("bucket", b)
                    .var_changed("j", j - 1)
                    .aux(aux(&buckets, Some(b)))
                    .emit(format!("Bucket {}: swap {} and {}", b, left, right));
                j -= 1;
            }
        }
    }

    let mut k = 0;
    for b in 0..bucket_count {
        for j in 0..buckets[b].len() {
            let value = buckets[b][j];
            a[k] = value;
            rec.frame(&a)
                .mark_range(0..k, Mark::Sorted)
                .write(k)
                .var("k", k)
                .aux(aux(&buckets, Some(b)))
                .emit(format!("Gather {} from bucket {} into position {}", value, b, k));
            k += 1;
        }
    }

    rec.frame(&a)
        .mark_range(0..n, Mark::Sorted)
        .aux(aux(&buckets, None))
        .emit("Array is sorted");
    Ok(rec.finish())
}

fn min_max(values: &[i64]) -> (i64, i64) {
    values
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{assert_sorted_terminal, assert_well_formed};

    fn params() -> Params {
        Params::new()
            .with_choice("base", "10")
            .with_number("buckets", 4)
    }

    #[test]
    fn test_distribution_sorts_sort() {
        let inputs: [&[i64]; 4] = [
            &[5, 2, 4, 1],
            &[0, 0],
            &[170, 45, 75, 90, 802, 24, 2, 66],
            &[7, 7, 3],
        ];
        for generate in [counting_sort, radix_sort, bucket_sort] {
            for input in inputs {
                let trace = generate(input, &params()).unwrap();
                assert_well_formed(&trace, input, true);
                assert_sorted_terminal(&trace, input);
            }
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        for generate in [counting_sort, radix_sort, bucket_sort] {
            assert!(matches!(
                generate(&[3, -2], &params()),
                Err(ValidationError::NegativeValue { value: -2, .. })
            ));
        }
    }

    #[test]
    fn test_counting_sort_value_cap() {
        assert!(matches!(
            counting_sort(&[1, MAX_COUNTING_VALUE + 1], &params()),
            Err(ValidationError::ValueTooLarge { .. })
        ));
    }

    #[test]
    fn test_counting_sort_tallies() {
        let trace = counting_sort(&[3, 1, 3], &params()).unwrap();
        let tallied = trace.get(4).unwrap();
        assert_eq!(
            tallied.auxiliary_state,
            Some(AuxiliaryState::Count {
                counts: vec![1, 0, 2],
                offset: 1,
                active: Some(2),
            })
        );
        assert_eq!(trace.terminal().metrics.swaps, 3);
        assert_eq!(trace.terminal().metrics.comparisons, 0);
    }

    #[test]
    fn test_radix_sort_passes_per_digit() {
        let trace = radix_sort(&[802, 2, 45], &params()).unwrap();
        let digits: Vec<u32> = trace
            .iter()
            .filter_map(|s| match &s.auxiliary_state {
                Some(AuxiliaryState::Buckets { digit: Some(d), .. }) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(digits.first(), Some(&0));
        assert_eq!(digits.last(), Some(&2));
    }

    #[test]
    fn test_radix_sort_binary_base() {
        let input = [5, 3, 6, 1];
        let trace = radix_sort(&input, &params().with_choice("base", "2")).unwrap();
        assert_sorted_terminal(&trace, &input);
    }

    #[test]
    fn test_single_bucket_degenerates_to_insertion_sort() {
        let input = [4, 3, 2, 1];
        let trace = bucket_sort(&input, &params().with_number("buckets", 1)).unwrap();
        assert_sorted_terminal(&trace, &input);
        // reversed input: every comparison finds an inversion
        assert_eq!(trace.terminal().metrics.comparisons, 6);
        assert_eq!(trace.terminal().metrics.swaps, 6 + 4);
    }
}
