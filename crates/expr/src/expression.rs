use std::{fmt, str::FromStr};

use optview_core::Model;

use crate::{ExpressionError, ast::Node, grammar};

/// Inputs an expression must evaluate at before it is accepted as an objective.
pub const VALIDATION_SAMPLE: [f64; 3] = [0.0, 1.0, 2.0];

/// A parsed, immutable expression `f(x)`.
///
/// Keeps the source text for display alongside the parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parses an expression from source text.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the text is blank, does not match the
    /// grammar, or names an unknown variable or function.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let root = grammar::parse(source)?;
        Ok(Self {
            source: source.trim().to_owned(),
            root,
        })
    }

    /// Parses an expression and checks it over [`VALIDATION_SAMPLE`].
    ///
    /// # Errors
    ///
    /// Returns the parse error, or the first evaluation error over the sample.
    pub fn validate(source: &str) -> Result<Self, ExpressionError> {
        let expression = Self::parse(source)?;
        expression.check(&VALIDATION_SAMPLE)?;
        Ok(expression)
    }

    /// The trimmed source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::Domain`] if the result is not a number.
    pub fn eval(&self, x: f64) -> Result<f64, ExpressionError> {
        let y = self.root.eval(x);
        if y.is_nan() {
            Err(ExpressionError::Domain { x })
        } else {
            Ok(y)
        }
    }

    /// Evaluates the expression element-wise over `xs`.
    ///
    /// # Errors
    ///
    /// Returns the error for the first element that fails.
    pub fn evaluate(&self, xs: &[f64]) -> Result<Vec<f64>, ExpressionError> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// Checks that the expression evaluates at every sample point.
    ///
    /// # Errors
    ///
    /// Returns the error for the first sample point that fails.
    pub fn check(&self, sample: &[f64]) -> Result<(), ExpressionError> {
        sample.iter().try_for_each(|&x| self.eval(x).map(drop))
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Model for Expression {
    type Input = f64;
    type Output = f64;
    type Error = ExpressionError;

    fn call(&self, input: &f64) -> Result<f64, Self::Error> {
        self.eval(*input)
    }
}
