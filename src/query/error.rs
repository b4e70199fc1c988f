//! Error types for filter parsing and evaluation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("Invalid filter syntax: {message}")]
    InvalidSyntax { message: String },

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Cannot apply '{function}' to {kind}")]
    TypeMismatch {
        function: &'static str,
        kind: &'static str,
    },
}
