//! Error types for formula evaluation.

use thiserror::Error;

/// Why the evaluator rejected a (fully substituted) expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Empty expression")]
    Empty,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Evaluation error: {0}")]
    Runtime(String),

    #[error("Expression produced no value")]
    NoValue,

    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Unsupported result type: {0}")]
    Unsupported(String),
}
