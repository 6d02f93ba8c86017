//! Instrumented step generators
//!
//! Every generator has the signature of [`GenerateFn`]: it validates its
//! preconditions, runs the textbook algorithm once on a private copy of the
//! input while driving a [`Recorder`](crate::recorder::Recorder), and returns
//! the finished trace. Generators are pure; the same input and parameters
//! always yield the same trace.
//!
//! - [`sorting`]: comparison sorts (bubble, selection, insertion, quick,
//!   merge, heap, shell, tim)
//! - [`distribution`]: non-comparison sorts (counting, radix, bucket)
//! - [`searching`]: linear, binary, jump search and the two-pointer pair sum
//! - [`analysis`]: majority vote and mode
//! - [`strings`]: bracket matching and string reversal

pub mod analysis;
pub mod distribution;
pub mod searching;
pub mod sorting;
pub mod strings;

use crate::errors::ValidationError;
use crate::registry::Params;
use crate::snapshot::Trace;

/// Signature shared by all step generators
pub type GenerateFn = fn(&[i64], &Params) -> Result<Trace, ValidationError>;

pub(crate) fn require_len(
    algorithm: &'static str,
    input: &[i64],
    min: usize,
) -> Result<(), ValidationError> {
    if input.len() < min {
        return Err(ValidationError::TooFewElements {
            algorithm,
            min,
            got: input.len(),
        });
    }
    Ok(())
}

pub(crate) fn require_sorted(algorithm: &'static str, input: &[i64]) -> Result<(), ValidationError> {
    match input.windows(2).position(|w| w[0] > w[1]) {
        Some(i) => Err(ValidationError::Unsorted {
            algorithm,
            index: i + 1,
        }),
        None => Ok(()),
    }
}

/// Reject negative values and values above `max`
pub(crate) fn require_value_range(
    algorithm: &'static str,
    input: &[i64],
    max: i64,
) -> Result<(), ValidationError> {
    for &value in input {
        if value < 0 {
            return Err(ValidationError::NegativeValue { algorithm, value });
        }
        if value > max {
            return Err(ValidationError::ValueTooLarge {
                algorithm,
                value,
                max,
            });
        }
    }
    Ok(())
}

/// Render a slice of character codes as text
pub(crate) fn codes_to_string(codes: &[i64]) -> String {
    codes
        .iter()
        .map(|&c| {
            u32::try_from(c)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::snapshot::{Mark, Trace};

    /// Every trace a generator returns must satisfy the structural invariants
    pub fn assert_well_formed(trace: &Trace, input: &[i64], fixed_length: bool) {
        if let Err(violation) = trace.check_invariants(input, fixed_length) {
            panic!("malformed trace: {}", violation);
        }
    }

    /// Terminal frame of a sort: ascending output, every index sorted
    pub fn assert_sorted_terminal(trace: &Trace, input: &[i64]) {
        let mut expected = input.to_vec();
        expected.sort();
        let last = trace.terminal();
        assert_eq!(last.array_state, expected);
        assert_eq!(
            last.indices_marked(Mark::Sorted),
            (0..input.len()).collect::<Vec<_>>()
        );
        assert!(last.result.is_none());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_sorted_reports_first_break() {
        assert!(require_sorted("x", &[1, 2, 2, 5]).is_ok());
        assert_eq!(
            require_sorted("x", &[1, 3, 2]),
            Err(ValidationError::Unsorted {
                algorithm: "x",
                index: 2
            })
        );
    }

    #[test]
    fn test_value_range() {
        assert!(require_value_range("x", &[0, 5], 5).is_ok());
        assert!(matches!(
            require_value_range("x", &[3, -1], 5),
            Err(ValidationError::NegativeValue { value: -1, .. })
        ));
        assert!(matches!(
            require_value_range("x", &[6], 5),
            Err(ValidationError::ValueTooLarge { value: 6, .. })
        ));
    }

    #[test]
    fn test_codes_to_string() {
        assert_eq!(codes_to_string(&[104, 105]), "hi");
        assert_eq!(codes_to_string(&[-1]), "\u{FFFD}");
    }
}
