use thiserror::Error;

/// Errors produced while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// The input was blank.
    #[error("expression is empty")]
    Empty,

    /// The input does not match the grammar.
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// A name other than `x`, `pi` or `e` was used as a value.
    #[error("unknown variable `{0}`, only `x` is allowed")]
    UnknownVariable(String),

    /// A call to a function outside the supported set.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// Evaluation produced no real value, e.g. `sqrt(-1)`.
    #[error("expression is undefined at x = {x}")]
    Domain { x: f64 },
}
