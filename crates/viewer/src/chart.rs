//! Describes what the chart shows, independent of any drawing toolkit.

use optview_expr::{Expression, ExpressionError};
use optview_solvers::optimization::Bounds;

use crate::Record;

/// Number of points sampled across the bounds for the background curve.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// The objective sampled across the bounds.
///
/// Points where the objective is undefined or infinite split the curve into
/// separate segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    segments: Vec<Vec<Record>>,
}

impl Curve {
    /// Samples `expression` at `resolution` evenly spaced points, both bounds
    /// included. Fewer than two points are raised to two.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error if no point could be evaluated.
    pub fn sample(
        expression: &Expression,
        bounds: Bounds,
        resolution: usize,
    ) -> Result<Self, ExpressionError> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        let mut first_error = None;

        for x in bounds.linspace(resolution.max(2)) {
            match expression.eval(x) {
                Ok(y) if y.is_finite() => current.push(Record::new(x, y)),
                result => {
                    if let Err(err) = result {
                        first_error.get_or_insert(err);
                    }
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        match first_error {
            Some(err) if segments.is_empty() => Err(err),
            _ => Ok(Self { segments }),
        }
    }

    /// Runs of consecutive defined points.
    #[must_use]
    pub fn segments(&self) -> &[Vec<Record>] {
        &self.segments
    }

    /// Every defined point, in order.
    pub fn points(&self) -> impl Iterator<Item = &Record> {
        self.segments.iter().flatten()
    }
}

/// How a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An earlier evaluation, drawn in blue.
    Visited,
    /// The latest visible evaluation, drawn in red.
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub record: Record,
    pub role: Role,
}

/// Everything needed to draw one frame of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart<'a> {
    pub title: String,
    pub curve: &'a Curve,
    pub markers: Vec<Marker>,
}

/// Builds the chart for the visible evaluation records.
///
/// Only the last record is [`Role::Current`].
#[must_use]
pub fn render<'a>(curve: &'a Curve, visible: &[Record]) -> Chart<'a> {
    let last = visible.len().saturating_sub(1);
    let markers = visible
        .iter()
        .enumerate()
        .map(|(i, &record)| Marker {
            record,
            role: if i == last { Role::Current } else { Role::Visited },
        })
        .collect();

    Chart {
        title: title(visible.len()),
        curve,
        markers,
    }
}

/// The chart heading for `count` visible evaluations.
#[must_use]
pub fn title(count: usize) -> String {
    format!("Optimization Iteration Nº = {count}")
}
