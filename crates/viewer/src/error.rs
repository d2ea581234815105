use optview_expr::ExpressionError;
use optview_solvers::optimization::{self, BoundsError, golden_section};
use thiserror::Error;

use crate::Method;

/// Hint shown when a method cannot produce a run.
pub const UNDER_DEVELOPMENT: &str =
    "Sorry, currently it is under development, please choose another method";

/// Hint shown when both limits are equal.
pub const EQUAL_LIMITS: &str = "Limits must have different values.";

/// A run configuration that cannot be used to start a minimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Limits must have different values.")]
    EqualLimits,

    #[error("limits must be finite, got [{lower}, {upper}]")]
    NonFiniteLimits { lower: f64, upper: f64 },

    #[error("initial point must be finite, got {0}")]
    NonFiniteStart(f64),

    #[error("{method} has no option named `{name}`")]
    UnknownOption { method: Method, name: String },

    #[error("option `{name}` must be a whole number, got {value}")]
    NotACount { name: &'static str, value: f64 },

    #[error("option `{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("option `{name}` is not set")]
    MissingOption { name: &'static str },

    #[error("invalid golden section options: {0}")]
    GoldenSection(#[from] golden_section::ConfigError),
}

impl From<BoundsError> for ConfigurationError {
    fn from(err: BoundsError) -> Self {
        match err {
            BoundsError::Degenerate(_) => Self::EqualLimits,
            BoundsError::NotFinite(lower, upper) => Self::NonFiniteLimits { lower, upper },
        }
    }
}

/// A run that was started but produced no recording.
#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("{0} is not available")]
    Unsupported(Method),

    #[error("{method} failed: {source}")]
    Solver {
        method: Method,
        #[source]
        source: optimization::Error,
    },

    #[error("{method} failed: {source}")]
    Library {
        method: Method,
        #[source]
        source: argmin::core::Error,
    },
}

/// Any failure of [`run`](crate::run).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Optimization(#[from] OptimizationError),
}

impl RunError {
    /// The text shown to the user in place of the error.
    ///
    /// Optimization failures all map to the same generic hint; their detail
    /// only goes to the log.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::Optimization(_) => UNDER_DEVELOPMENT.to_owned(),
            Self::Expression(err) => err.to_string(),
            Self::Configuration(err) => err.to_string(),
        }
    }
}
