use optview_solvers::optimization::Bounds;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::{ConfigurationError, Method, MethodOptions};

/// Where a run starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartPoint {
    /// A given initial point.
    Fixed(f64),
    /// A point drawn uniformly from the bounds with a seeded generator.
    Random { seed: u64 },
}

impl StartPoint {
    /// The initial point for `bounds`.
    ///
    /// A fixed point is returned as is; solvers clamp it into the bounds.
    /// The same seed always draws the same point.
    #[must_use]
    pub fn resolve(self, bounds: Bounds) -> f64 {
        match self {
            Self::Fixed(x) => x,
            Self::Random { seed } => {
                let mut rng = Xoshiro256Plus::seed_from_u64(seed);
                rng.gen_range(bounds.lower()..bounds.upper())
            }
        }
    }
}

/// A validated request to run one method over one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    bounds: Bounds,
    start: StartPoint,
    options: MethodOptions,
}

impl RunConfig {
    /// Validates the limits and the start point for `method`.
    ///
    /// Reversed limits are accepted and swapped. The method starts from its
    /// default options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EqualLimits`] when `lower == upper`, or
    /// an error for a non-finite limit or fixed start point.
    pub fn new(
        lower: f64,
        upper: f64,
        start: StartPoint,
        method: Method,
    ) -> Result<Self, ConfigurationError> {
        let bounds = Bounds::new(lower, upper)?;
        if let StartPoint::Fixed(x) = start {
            if !x.is_finite() {
                return Err(ConfigurationError::NonFiniteStart(x));
            }
        }
        Ok(Self {
            bounds,
            start,
            options: MethodOptions::defaults(method),
        })
    }

    /// Replaces the method options, switching to their method.
    #[must_use]
    pub fn with_options(mut self, options: MethodOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn start(&self) -> StartPoint {
        self.start
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.options.method()
    }

    #[must_use]
    pub fn options(&self) -> &MethodOptions {
        &self.options
    }
}
