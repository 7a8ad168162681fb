//! Parser error type.

use std::fmt;

/// A syntax error with the character offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// A construct the generator cannot honor, named explicitly.
    pub fn unsupported(construct: &str, position: usize) -> Self {
        Self {
            message: format!("unsupported construct: {}", construct),
            position,
        }
    }

    pub fn unexpected_end(expected: &str, position: usize) -> Self {
        Self {
            message: format!("unexpected end of pattern, expected {}", expected),
            position,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, SyntaxError>;
