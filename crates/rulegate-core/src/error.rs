//! Error types shared across the rulegate crates

use thiserror::Error;

/// Raised while turning configuration nodes into conditions or expressions.
///
/// Carries a human-readable message naming the offending key or value so a
/// misconfiguration can be diagnosed from the message alone. Soft errors mark
/// inputs a provider chose not to handle; callers may skip those instead of
/// aborting the surrounding configuration unit.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    soft: bool,
}

impl ParseError {
    /// Create a hard parse error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            soft: false,
        }
    }

    /// Create a soft, ignorable parse error.
    pub fn soft(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            soft: true,
        }
    }

    /// Whether the caller may skip over this error.
    pub fn is_soft(&self) -> bool {
        self.soft
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raised while matching a condition against a context.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// A required context key is absent.
    #[error("Missing key '{0}'.")]
    MissingKey(String),

    /// A context key holds a value of an unexpected type.
    #[error("'{key}' holds a {actual}, expected a {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Two operand values cannot be ordered against each other.
    #[error("Cannot compare '{left}' {operator} '{right}'")]
    TypeMismatch {
        left: String,
        operator: String,
        right: String,
    },

    /// Generic evaluation error.
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

/// Result type for parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for evaluation operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;
