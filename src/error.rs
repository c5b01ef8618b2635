use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ConfigError, Operation};

/// Main error type for arith
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("{0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Cannot assign to '{0}': name is reserved")]
    InvalidAssignment(String),

    #[error("Invalid operand '{0}': expected a number")]
    InvalidOperand(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Config file already exists: {0}")]
    ConfigExists(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the numeric operations themselves
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: Operation },

    #[error("Math domain error: {0}")]
    Domain(String),
}

/// Errors produced while tokenizing or parsing an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("expression nested too deeply (limit {0})")]
    TooDeep(usize),
}

/// Errors related to the history file
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to read history file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Failed to write history file {0}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Failed to parse history file {0}: {1}")]
    ParseError(PathBuf, String),
}

impl CalcError {
    /// True when the failure came from the numbers rather than the input text
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, CalcError::Arithmetic(_))
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_display() {
        let error = CalcError::from(ArithmeticError::DivisionByZero);
        assert_eq!(error.to_string(), "Division by zero");
        assert!(error.is_arithmetic());
    }

    #[test]
    fn test_overflow_names_operation() {
        let error = ArithmeticError::Overflow {
            operation: Operation::Multiply,
        };
        assert_eq!(error.to_string(), "Arithmetic overflow in multiply");
    }

    #[test]
    fn test_parse_error_display() {
        let error = CalcError::from(ParseError::UnexpectedChar {
            ch: '$',
            position: 4,
        });
        assert_eq!(
            error.to_string(),
            "Syntax error: unexpected character '$' at position 4"
        );
        assert!(!error.is_arithmetic());
    }

    #[test]
    fn test_unknown_variable_display() {
        let error = CalcError::UnknownVariable("foo".to_string());
        assert_eq!(error.to_string(), "Unknown variable: foo");
    }
}
