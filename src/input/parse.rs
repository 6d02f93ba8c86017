//! Raw input text to numeric sequences
//!
//! Three notations are understood. Array literals accept `[5, 2, 4]`,
//! `5 2 4` and `5,2,4`; bracket strings keep only `()[]{}`; text keeps every
//! character. Errors report a 1-based column into the raw text.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected character '{found}' at column {column}")]
    UnexpectedChar { found: char, column: usize },

    #[error("Invalid number '{token}' at column {column}")]
    InvalidNumber { token: String, column: usize },

    #[error("Missing closing ']' at column {column}")]
    MissingClosingBracket { column: usize },
}

impl ParseError {
    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { column, .. }
            | ParseError::InvalidNumber { column, .. }
            | ParseError::MissingClosingBracket { column } => *column,
        }
    }
}

/// Scanner over an array literal
struct ArrayScanner {
    input: Vec<char>,
    position: usize,
}

impl ArrayScanner {
    fn new(raw: &str) -> Self {
        Self {
            input: raw.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn column(&self) -> usize {
        self.position + 1
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn unexpected(&self, found: char) -> ParseError {
        ParseError::UnexpectedChar {
            found,
            column: self.column(),
        }
    }

    fn scan(&mut self) -> Result<Vec<i64>, ParseError> {
        let mut values = Vec::new();
        self.skip_whitespace();
        let bracketed = self.peek() == Some('[');
        if bracketed {
            self.advance();
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                None if bracketed => {
                    return Err(ParseError::MissingClosingBracket {
                        column: self.column(),
                    })
                }
                None => break,
                Some(']') if bracketed => {
                    self.advance();
                    self.skip_whitespace();
                    if let Some(ch) = self.peek() {
                        return Err(self.unexpected(ch));
                    }
                    break;
                }
                Some(ch) if ch == '-' || ch == '+' || ch.is_ascii_digit() => {
                    values.push(self.number()?);
                    self.skip_whitespace();
                    if self.peek() == Some(',') {
                        self.advance();
                    }
                }
                Some(ch) => return Err(self.unexpected(ch)),
            }
        }
        Ok(values)
    }

    fn number(&mut self) -> Result<i64, ParseError> {
        let column = self.column();
        let mut token = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            token.push(sign);
            self.advance();
        }
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            token.push(ch);
            self.advance();
        }

        // A number must be followed by a separator
        if let Some(ch) = self.peek() {
            if !(ch.is_whitespace() || ch == ',' || ch == ']') {
                return Err(self.unexpected(ch));
            }
        }
        token
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidNumber { token, column })
    }
}

/// `[5, 2, 4]`, `5 2 4` or `5,2,4`; signed integers, empty brackets allowed
pub fn parse_array(raw: &str) -> Result<Vec<i64>, ParseError> {
    ArrayScanner::new(raw).scan()
}

/// Character codes of `()[]{}`, skipping whitespace
pub fn parse_brackets(raw: &str) -> Result<Vec<i64>, ParseError> {
    raw.chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(i, ch)| match ch {
            '(' | ')' | '[' | ']' | '{' | '}' => Ok(ch as i64),
            found => Err(ParseError::UnexpectedChar {
                found,
                column: i + 1,
            }),
        })
        .collect()
}

/// Unicode scalar value of every character
pub fn parse_text(raw: &str) -> Vec<i64> {
    raw.chars().map(|ch| ch as i64).collect()
}
