use crate::optimization::Bounds;

/// The golden ratio: φ = (1 + √5) / 2
const PHI: f64 = 1.618_033_988_749_895;

/// The inverse golden ratio: 1/φ
///
/// This equals φ - 1 due to the golden ratio's unique property.
const INV_PHI: f64 = PHI - 1.0;

/// Golden section search bracket.
///
/// Maintains the outer interval [left, right] and two interior points
/// positioned according to the golden ratio.
#[derive(Debug, Clone, Copy)]
pub(super) struct GoldenBracket {
    /// Outer left bound.
    pub(super) left: f64,
    /// Outer right bound.
    pub(super) right: f64,
    /// Inner left point at `left + (1 - φ⁻¹) * width`.
    pub(super) inner_left: f64,
    /// Inner right point at `left + φ⁻¹ * width`.
    pub(super) inner_right: f64,
}

impl GoldenBracket {
    /// Creates a bracket spanning the bounds with golden-ratio interior points.
    pub(super) fn new(bounds: Bounds) -> Self {
        let left = bounds.lower();
        let right = bounds.upper();
        let width = bounds.width();

        Self {
            left,
            right,
            inner_left: left + (1.0 - INV_PHI) * width,
            inner_right: left + INV_PHI * width,
        }
    }

    /// Returns the width of the current bracket.
    pub(super) fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Shrinks the bracket to `[left, inner_right]`.
    ///
    /// The old `inner_left` becomes the new `inner_right`.
    pub(super) fn shrink_right(&mut self) {
        self.right = self.inner_right;
        self.inner_right = self.inner_left;
        self.inner_left = self.left + (1.0 - INV_PHI) * self.width();
    }

    /// Shrinks the bracket to `[inner_left, right]`.
    ///
    /// The old `inner_right` becomes the new `inner_left`.
    pub(super) fn shrink_left(&mut self) {
        self.left = self.inner_left;
        self.inner_left = self.inner_right;
        self.inner_right = self.left + INV_PHI * self.width();
    }

    /// Returns x for the new `inner_left` after shrinking right (without mutating).
    pub(super) fn new_inner_left(&self) -> f64 {
        let new_width = self.inner_right - self.left;
        self.left + (1.0 - INV_PHI) * new_width
    }

    /// Returns x for the new `inner_right` after shrinking left (without mutating).
    pub(super) fn new_inner_right(&self) -> f64 {
        let new_left = self.inner_left;
        new_left + INV_PHI * (self.right - new_left)
    }
}
