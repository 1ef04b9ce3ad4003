use thiserror::Error;

use crate::dice::DiceError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("invalid index '{0}' (expected 1..={1} or #id)")]
    InvalidIndex(String, usize),

    #[error("invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },

    #[error("invalid dice expression: {0}")]
    Dice(#[from] DiceError),

    #[error("invalid name '{0}': {1}")]
    InvalidName(String, &'static str),

    #[error("unknown {what} '{value}' (expected one of: {expected})")]
    Unknown {
        what: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid value '{value}' for {property} (expected one of: {expected})")]
    InvalidLiteral {
        property: &'static str,
        value: String,
        expected: String,
    },

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
}

impl TrackerError {
    pub(crate) fn unknown(what: &'static str, value: &str, expected: &[&str]) -> Self {
        TrackerError::Unknown {
            what,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
