//! Array analysis: Boyer-Moore majority vote and mode
//!
//! Neither algorithm rearranges the array. Each scans left to right once per
//! phase and reports a `frequency` result.

use super::require_len;
use crate::errors::ValidationError;
use crate::recorder::Recorder;
use crate::registry::Params;
use crate::snapshot::{AuxiliaryState, Frequency, Mark, PointerColor, Trace, TraceResult};
use std::collections::BTreeMap;

const MAJORITY: &str = "Majority element";
const MODE: &str = "Mode";

/// Vote for a candidate, then verify it in a second pass.
///
/// The result is `frequency` when the candidate occurs more than `n / 2`
/// times and `search(None)` otherwise.
pub fn majority_element(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(MAJORITY, input, 1)?;
    let n = input.len();
    let mut rec = Recorder::new(input);
    let mut candidate: Option<i64> = None;
    let mut count = 0usize;

    for (i, &value) in input.iter().enumerate() {
        match candidate {
            Some(c) if count > 0 => {
                let message = if value == c {
                    count += 1;
                    format!("{} matches candidate {}, count = {}", value, c, count)
                } else {
                    count -= 1;
                    format!("{} cancels a vote for {}, count = {}", value, c, count)
                };
                let mark = if value == c { Mark::Match } else { Mark::Mismatch };
                rec.frame(input)
                    .compare_one(i)
                    .mark(i, mark)
                    .pointer(i, "i", PointerColor::Primary)
                    .var("i", i)
                    .var("candidate", c)
                    .var_changed("count", count)
                    .aux(AuxiliaryState::Voting {
                        candidate: Some(c),
                        count,
                    })
                    .emit(message);
            }
            _ => {
                candidate = Some(value);
                count = 1;
                rec.frame(input)
                    .mark(i, Mark::Current)
                    .pointer(i, "i", PointerColor::Primary)
                    .var("i", i)
                    .var_changed("candidate", value)
                    .var_changed("count", count)
                    .aux(AuxiliaryState::Voting {
                        candidate: Some(value),
                        count,
                    })
                    .emit(format!("Count is zero, {} becomes the candidate", value));
            }
        }
    }

    // Non-empty input always leaves a candidate behind.
    let Some(candidate) = candidate else {
        return Ok(rec.finish());
    };

    let mut occurrences = 0usize;
    let mut matches = Vec::new();
    for (i, &value) in input.iter().enumerate() {
        let found = value == candidate;
        if found {
            occurrences += 1;
            matches.push(i);
        }
        rec.frame(input)
            .mark_all(matches.iter().copied(), Mark::Match)
            .compare_one(i)
            .pointer(i, "i", PointerColor::Accent)
            .var("candidate", candidate)
            .var_changed("occurrences", occurrences)
            .aux(AuxiliaryState::Voting {
                candidate: Some(candidate),
                count,
            })
            .emit(if found {
                format!("Verify: a[{}] = {} is the candidate", i, value)
            } else {
                format!("Verify: a[{}] = {} is not the candidate", i, value)
            });
    }

    let frame = rec
        .frame(input)
        .var("candidate", candidate)
        .var("occurrences", occurrences)
        .var("needed", n / 2 + 1);
    if occurrences * 2 > n {
        frame
            .mark_all(matches.iter().copied(), Mark::Found)
            .result(TraceResult::Frequency(Frequency {
                value: candidate,
                count: occurrences,
            }))
            .emit(format!(
                "{} appears {} of {} times: majority",
                candidate, occurrences, n
            ));
    } else {
        frame
            .mark_all(0..n, Mark::Eliminated)
            .result(TraceResult::Search(None))
            .emit(format!(
                "{} appears only {} of {} times: no majority",
                candidate, occurrences, n
            ));
    }
    Ok(rec.finish())
}

/// Most frequent value; on a tie the smallest value wins
pub fn mode(input: &[i64], _params: &Params) -> Result<Trace, ValidationError> {
    require_len(MODE, input, 1)?;
    let mut rec = Recorder::new(input);
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut best: Option<Frequency> = None;

    for (i, &value) in input.iter().enumerate() {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        let count = *count;

        let improves = match best {
            None => true,
            Some(b) => count > b.count || (count == b.count && value < b.value),
        };
        let message = if improves {
            best = Some(Frequency { value, count });
            format!("{} seen {} time(s), new best", value, count)
        } else {
            format!("{} seen {} time(s)", value, count)
        };

        let mut frame = rec
            .frame(input)
            .count_comparisons(1)
            .mark(i, Mark::Current)
            .pointer(i, "i", PointerColor::Primary)
            .var("i", i)
            .var_changed("count", count);
        if let Some(b) = best {
            frame = if improves {
                frame.var_changed("best", b.value)
            } else {
                frame.var("best", b.value)
            };
        }
        frame
            .aux(AuxiliaryState::Mode {
                counts: counts.clone(),
                best,
            })
            .emit(message);
    }

    // The first element always sets a best.
    let Some(best) = best else {
        return Ok(rec.finish());
    };
    let hits = input
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == best.value)
        .map(|(i, _)| i);
    rec.frame(input)
        .mark_all(hits, Mark::Found)
        .var("mode", best.value)
        .var("count", best.count)
        .aux(AuxiliaryState::Mode {
            counts,
            best: Some(best),
        })
        .result(TraceResult::Frequency(best))
        .emit(format!("Mode is {} ({} occurrences)", best.value, best.count));
    Ok(rec.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::assert_well_formed;

    #[test]
    fn test_majority_found() {
        let input = [2, 2, 1, 1, 2];
        let trace = majority_element(&input, &Params::new()).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_eq!(
            trace.result(),
            Some(&TraceResult::Frequency(Frequency { value: 2, count: 3 }))
        );
        assert_eq!(trace.terminal().indices_marked(Mark::Found), vec![0, 1, 4]);
    }

    #[test]
    fn test_no_majority() {
        let input = [1, 2, 3];
        let trace = majority_element(&input, &Params::new()).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_eq!(trace.result(), Some(&TraceResult::Search(None)));
    }

    #[test]
    fn test_majority_vote_phase() {
        let trace = majority_element(&[1, 2, 3], &Params::new()).unwrap();
        // 1 is adopted, 2 cancels it, 3 is adopted on a zero count
        let votes: Vec<Option<AuxiliaryState>> = (1..=3)
            .map(|i| trace.get(i).unwrap().auxiliary_state.clone())
            .collect();
        assert_eq!(
            votes,
            vec![
                Some(AuxiliaryState::Voting { candidate: Some(1), count: 1 }),
                Some(AuxiliaryState::Voting { candidate: Some(1), count: 0 }),
                Some(AuxiliaryState::Voting { candidate: Some(3), count: 1 }),
            ]
        );
        assert_eq!(trace.get(3).unwrap().metrics.comparisons, 1);
    }

    #[test]
    fn test_majority_single_element() {
        let trace = majority_element(&[7], &Params::new()).unwrap();
        assert_eq!(
            trace.result(),
            Some(&TraceResult::Frequency(Frequency { value: 7, count: 1 }))
        );
    }

    #[test]
    fn test_majority_empty_rejected() {
        assert!(matches!(
            majority_element(&[], &Params::new()),
            Err(ValidationError::TooFewElements { min: 1, got: 0, .. })
        ));
    }

    #[test]
    fn test_mode_tie_prefers_smallest() {
        let input = [3, 1, 3, 1, 2];
        let trace = mode(&input, &Params::new()).unwrap();
        assert_well_formed(&trace, &input, true);
        assert_eq!(
            trace.result(),
            Some(&TraceResult::Frequency(Frequency { value: 1, count: 2 }))
        );
        assert_eq!(trace.terminal().indices_marked(Mark::Found), vec![1, 3]);
    }

    #[test]
    fn test_mode_counts_payload() {
        let trace = mode(&[5, 5, 4], &Params::new()).unwrap();
        let expected: BTreeMap<i64, usize> = [(4, 1), (5, 2)].into_iter().collect();
        assert_eq!(
            trace.get(3).unwrap().auxiliary_state,
            Some(AuxiliaryState::Mode {
                counts: expected,
                best: Some(Frequency { value: 5, count: 2 }),
            })
        );
        assert_eq!(trace.terminal().metrics.comparisons, 3);
    }
}
