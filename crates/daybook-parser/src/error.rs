//! Parser error types

use thiserror::Error;

/// Errors raised while configuring the annotation parser.
///
/// Extraction itself never fails; only building a parser from a
/// user-supplied character set can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("Invalid character range: {start:?}..={end:?} (start must not exceed end)")]
    InvalidRange { start: char, end: char },

    #[error("Failed to compile tag pattern: {0}")]
    Pattern(String),
}

/// Result type for parser configuration
pub type ParserResult<T> = Result<T, ParserError>;

impl From<regex::Error> for ParserError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
