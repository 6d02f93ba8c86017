//! Error types for trace generation
//!
//! - [`ValidationError`]: input or parameters fail an algorithm's precondition.
//!   Recoverable; the player keeps it as a display string.
//! - [`InvariantViolation`]: a generator produced a malformed trace. This is a
//!   bug in the generator, never a user-facing condition.
//!
//! Parse failures live next to the parsers in [`crate::input::ParseError`].

use thiserror::Error;

/// Input or parameters rejected before any snapshot is recorded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("{algorithm} needs at least {min} element(s), got {got}")]
    TooFewElements {
        algorithm: &'static str,
        min: usize,
        got: usize,
    },

    #[error("{algorithm} accepts at most {max} elements, got {got}")]
    TooManyElements {
        algorithm: &'static str,
        max: usize,
        got: usize,
    },

    #[error("{algorithm} only sorts non-negative integers, found {value}")]
    NegativeValue { algorithm: &'static str, value: i64 },

    #[error("{algorithm} supports values up to {max}, found {value}")]
    ValueTooLarge {
        algorithm: &'static str,
        value: i64,
        max: i64,
    },

    #[error("{algorithm} requires input sorted in ascending order (index {index} breaks the order)")]
    Unsorted {
        algorithm: &'static str,
        index: usize,
    },

    #[error("Invalid bracket character '{found}' at position {position}")]
    InvalidBracket { found: char, position: usize },

    #[error("Missing required parameter '{0}'")]
    MissingParam(String),

    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParam { param: String, reason: String },
}

/// A generated trace broke one of the structural guarantees players rely on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("trace is empty")]
    EmptyTrace,

    #[error("snapshot at position {position} carries index {index}")]
    IndexMismatch { position: usize, index: usize },

    #[error("initial snapshot does not reproduce the input")]
    InitialStateAltered,

    #[error("initial snapshot carries marks or pointers")]
    InitialStateMarked,

    #[error("{counter} decreased at step {step}: {before} -> {after}")]
    MetricsDecreased {
        counter: &'static str,
        step: usize,
        before: u64,
        after: u64,
    },

    #[error("array length changed at step {step}: expected {expected}, got {got}")]
    LengthChanged {
        step: usize,
        expected: usize,
        got: usize,
    },

    #[error("result recorded at non-terminal step {step}")]
    EarlyResult { step: usize },
}
