use crate::optimization::Point;

use super::{Config, bracket::GoldenBracket};

/// Direction to shrink the bracket and where to evaluate next.
#[derive(Debug, Clone, Copy)]
pub(super) enum ShrinkDirection {
    /// Shrink left bound; payload is x for new `inner_right`.
    ShrinkLeft(f64),
    /// Shrink right bound; payload is x for new `inner_left`.
    ShrinkRight(f64),
}

impl ShrinkDirection {
    /// The x value to evaluate next.
    pub(super) fn x(self) -> f64 {
        match self {
            Self::ShrinkLeft(x) | Self::ShrinkRight(x) => x,
        }
    }
}

/// Bracket plus the evaluated interior points.
pub(super) struct State {
    bracket: GoldenBracket,
    left: Point,
    right: Point,
}

impl State {
    pub(super) fn new(bracket: GoldenBracket, left: Point, right: Point) -> Self {
        Self {
            bracket,
            left,
            right,
        }
    }

    /// Pure query: which direction to shrink and where to evaluate next.
    ///
    /// Ties shrink right. NaN objectives compare as worse than any number.
    pub(super) fn next_action(&self) -> ShrinkDirection {
        let left_better =
            self.left.objective <= self.right.objective || self.right.objective.is_nan();
        if left_better {
            ShrinkDirection::ShrinkRight(self.bracket.new_inner_left())
        } else {
            ShrinkDirection::ShrinkLeft(self.bracket.new_inner_right())
        }
    }

    /// Apply shrink and update interior point with new evaluation.
    pub(super) fn apply(&mut self, direction: ShrinkDirection, point: Point) {
        match direction {
            ShrinkDirection::ShrinkRight(_) => {
                // Old inner_left becomes new inner_right; new point is inner_left.
                self.bracket.shrink_right();
                self.right = self.left;
                self.left = point;
            }
            ShrinkDirection::ShrinkLeft(_) => {
                // Old inner_right becomes new inner_left; new point is inner_right.
                self.bracket.shrink_left();
                self.left = self.right;
                self.right = point;
            }
        }
    }

    pub(super) fn is_converged(&self, config: &Config) -> bool {
        let gap = (self.bracket.inner_right - self.bracket.inner_left).abs();
        let mid = 0.5 * (self.bracket.inner_left + self.bracket.inner_right);
        gap <= config.x_abs_tol() + config.x_rel_tol() * mid.abs()
    }
}
