//! Turning user input into the numeric sequences generators consume
//!
//! - [`parse`]: the three input notations and [`ParseError`]
//! - [`generate`]: seeded random inputs

pub mod generate;
pub mod parse;

pub use generate::{seeded_rng, GeneratedInput, GeneratorConfig, InputGenerator, Shape};
pub use parse::{parse_array, parse_brackets, parse_text, ParseError};

use crate::algorithms::codes_to_string;
use serde::Serialize;
use std::fmt;

/// How an algorithm reads its raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    ArrayLiteral,
    BracketString,
    Text,
}

impl Notation {
    pub fn parse(self, raw: &str) -> Result<Vec<i64>, ParseError> {
        match self {
            Notation::ArrayLiteral => parse_array(raw),
            Notation::BracketString => parse_brackets(raw),
            Notation::Text => Ok(parse_text(raw)),
        }
    }

    /// Render values back in this notation
    pub fn format(self, values: &[i64]) -> String {
        match self {
            Notation::ArrayLiteral => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("[{}]", parts.join(", "))
            }
            Notation::BracketString | Notation::Text => codes_to_string(values),
        }
    }

    /// Generator shape that produces valid input for this notation
    pub fn default_shape(self) -> Shape {
        match self {
            Notation::BracketString => Shape::Brackets,
            Notation::ArrayLiteral | Notation::Text => Shape::Random,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::ArrayLiteral => write!(f, "array"),
            Notation::BracketString => write!(f, "brackets"),
            Notation::Text => write!(f, "text"),
        }
    }
}
