use std::{fmt, str::FromStr};

use optview_expr::{Expression, ExpressionError};

/// Built-in objectives offered in the function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Quadratic,
    Mixed,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Quadratic, Preset::Mixed];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Quadratic => "Quadratic",
            Self::Mixed => "Mixed",
        }
    }

    /// The expression source of the preset.
    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            Self::Quadratic => "x^2",
            Self::Mixed => "(sin(1/2 * x) + 2 * cos(1/2 * x)) * x^2",
        }
    }

    /// Parses the preset source.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in sources; the `Result` mirrors
    /// [`Expression::parse`].
    pub fn expression(self) -> Result<Expression, ExpressionError> {
        Expression::parse(self.source())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}

/// A preset name that matches no built-in objective.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}`")]
pub struct UnknownPreset(pub String);
