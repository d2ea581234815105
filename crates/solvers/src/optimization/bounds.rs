use thiserror::Error;

/// A finite, non-degenerate search interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bounds must be finite, got [{0}, {1}]")]
    NotFinite(f64, f64),
    #[error("bounds must differ, got {0} for both")]
    Degenerate(f64),
}

impl Bounds {
    /// Creates bounds from two limits.
    ///
    /// If the limits are reversed, they are automatically swapped.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit or the width between them is not
    /// finite, or if both limits are equal.
    pub fn new(a: f64, b: f64) -> Result<Self, BoundsError> {
        if !a.is_finite() || !b.is_finite() || !(b - a).is_finite() {
            return Err(BoundsError::NotFinite(a, b));
        }
        if a == b {
            return Err(BoundsError::Degenerate(a));
        }
        let (lower, upper) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `x` moved onto the nearest point of the interval.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.lower, self.upper)
    }

    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.lower..=self.upper).contains(&x)
    }

    /// Returns `n` evenly spaced points from `lower` to `upper` inclusive.
    ///
    /// A single point is the midpoint; zero points is an empty vector.
    #[must_use]
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![0.5 * (self.lower + self.upper)],
            _ => {
                let step = self.width() / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.upper
                        } else {
                            self.lower + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}
