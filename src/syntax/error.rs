use thiserror::Error;

/// Malformed expression text. Offsets count characters from the start.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at position {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("Unterminated string starting at position {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unterminated quoted identifier starting at position {offset}")]
    UnterminatedIdentifier { offset: usize },

    #[error("Invalid number '{text}' at position {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("Expected {expected}, found {found} at position {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Expression too complex: more than {limit} at position {offset}")]
    TooComplex { limit: String, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::UnterminatedIdentifier { offset }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::TooComplex { offset, .. } => *offset,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
