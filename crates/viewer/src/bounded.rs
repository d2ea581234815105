//! argmin solvers run on an expression restricted to an interval.
//!
//! The argmin solvers used here search the whole real line. The objective
//! they see is the expression composed with a clamp into the bounds, so every
//! evaluation lands inside the interval and is logged at the clamped point.
//! Outside the bounds that objective is flat, which stops gradient-based
//! solvers on the bound nearest the minimum.

use std::{cell::Cell, marker::PhantomData};

use argmin::{
    core::{
        CostFunction, Error, Executor, Gradient, KV, State, TerminationReason,
        observers::{Observe, ObserverMode},
    },
    solver::{
        goldensectionsearch::GoldenSectionSearch, linesearch::MoreThuenteLineSearch,
        neldermead::NelderMead, quasinewton::LBFGS,
    },
};
use log::debug;
use optview_expr::ExpressionError;
use optview_solvers::optimization::{Bounds, Status};

use crate::recorder::{Outcome, Record, Recorder};

/// Settings of the simplex search behind `Nelder-Mead`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexConfig {
    pub max_iters: u64,
    /// Distance from the initial point to the second vertex.
    pub initial_step: f64,
    /// Converged once the objective values of the vertices have a standard
    /// deviation below this.
    pub f_tol: f64,
}

/// Settings of the start-point seeded line search behind `Powell`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineConfig {
    pub max_iters: u64,
    /// Relative width of the final bracket.
    pub x_tol: f64,
}

/// Settings of the limited-memory quasi-Newton search behind `L-BFGS-B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsConfig {
    pub max_iters: u64,
    /// Number of correction pairs kept.
    pub memory: usize,
    /// Relative finite-difference step.
    pub fd_step: f64,
    pub g_tol: f64,
    pub f_tol: f64,
}

/// Minimizes with a two-vertex Nelder-Mead simplex started at `x0`.
///
/// # Errors
///
/// Returns the argmin error if the objective fails at a trial point.
pub fn nelder_mead(
    recorder: &Recorder,
    bounds: Bounds,
    x0: f64,
    config: &SimplexConfig,
) -> Result<Outcome, Error> {
    let x0 = bounds.clamp(x0);
    let vertices = vec![x0, x0 + step_within(bounds, x0, config.initial_step)];
    let solver = NelderMead::new(vertices).with_sd_tolerance(config.f_tol)?;

    let result = Executor::new(BoundedObjective::<f64>::new(recorder, bounds), solver)
        .configure(|state| state.max_iters(config.max_iters))
        .add_observer(IterationLog::new(recorder, bounds), ObserverMode::Always)
        .run()?;
    Ok(outcome(bounds, x0, result.state()))
}

/// Minimizes with a golden section line search whose first bracket is built
/// around `x0`.
///
/// # Errors
///
/// Returns the argmin error if the objective fails at a trial point.
pub fn line_search(
    recorder: &Recorder,
    bounds: Bounds,
    x0: f64,
    config: &LineConfig,
) -> Result<Outcome, Error> {
    let x0 = bounds.clamp(x0);
    let solver =
        GoldenSectionSearch::new(bounds.lower(), bounds.upper())?.with_tolerance(config.x_tol)?;

    let result = Executor::new(BoundedObjective::<f64>::new(recorder, bounds), solver)
        .configure(|state| state.param(x0).max_iters(config.max_iters))
        .add_observer(IterationLog::new(recorder, bounds), ObserverMode::Always)
        .run()?;
    Ok(outcome(bounds, x0, result.state()))
}

/// Minimizes with L-BFGS and a More-Thuente line search from `x0`.
///
/// Gradients are one-sided finite differences taken inside the bounds.
///
/// # Errors
///
/// Returns the argmin error if the objective fails at a trial point.
pub fn lbfgs(
    recorder: &Recorder,
    bounds: Bounds,
    x0: f64,
    config: &LbfgsConfig,
) -> Result<Outcome, Error> {
    let x0 = bounds.clamp(x0);
    let linesearch: MoreThuenteLineSearch<Vec<f64>, Vec<f64>, f64> =
        MoreThuenteLineSearch::new();
    let solver = LBFGS::new(linesearch, config.memory)
        .with_tolerance_grad(config.g_tol)?
        .with_tolerance_cost(config.f_tol)?;

    let objective =
        BoundedObjective::<Vec<f64>>::new(recorder, bounds).with_fd_step(config.fd_step);
    let result = Executor::new(objective, solver)
        .configure(|state| state.param(vec![x0]).max_iters(config.max_iters))
        .add_observer(IterationLog::new(recorder, bounds), ObserverMode::Always)
        .run()?;
    Ok(outcome(bounds, x0, result.state()))
}

/// The solver variable, which is a single coordinate whatever its container.
pub trait Coordinate {
    fn coordinate(&self) -> f64;
}

impl Coordinate for f64 {
    fn coordinate(&self) -> f64 {
        *self
    }
}

impl Coordinate for Vec<f64> {
    fn coordinate(&self) -> f64 {
        self.first().copied().unwrap_or(f64::NAN)
    }
}

/// The expression composed with a clamp into the bounds.
///
/// Evaluations go through the recorder. The most recent one is remembered,
/// so asking again for the same point neither evaluates nor logs twice.
struct BoundedObjective<P> {
    recorder: Recorder,
    bounds: Bounds,
    fd_step: f64,
    last: Cell<Option<Record>>,
    param: PhantomData<P>,
}

impl<P> BoundedObjective<P> {
    fn new(recorder: &Recorder, bounds: Bounds) -> Self {
        Self {
            recorder: recorder.clone(),
            bounds,
            fd_step: f64::EPSILON.sqrt(),
            last: Cell::new(None),
            param: PhantomData,
        }
    }

    fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }

    fn value(&self, x: f64) -> Result<f64, ExpressionError> {
        let x = self.bounds.clamp(x);
        if let Some(last) = self.last.get().filter(|last| last.x == x) {
            return Ok(last.y);
        }
        let y = self.recorder.evaluate(x)?;
        self.last.set(Some(Record::new(x, y)));
        Ok(y)
    }

    /// One-sided difference quotient of the clamped objective at `x`.
    ///
    /// Zero outside the bounds, where the clamped objective is flat.
    fn slope(&self, x: f64) -> Result<f64, ExpressionError> {
        if !self.bounds.contains(x) {
            return Ok(0.0);
        }
        let h = step_within(self.bounds, x, self.fd_step * x.abs().max(1.0));
        let here = self.value(x)?;
        let there = self.value(x + h)?;
        Ok((there - here) / h)
    }
}

impl<P: Coordinate> CostFunction for BoundedObjective<P> {
    type Param = P;
    type Output = f64;

    fn cost(&self, param: &P) -> Result<f64, Error> {
        Ok(self.value(param.coordinate())?)
    }
}

impl Gradient for BoundedObjective<Vec<f64>> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, param: &Vec<f64>) -> Result<Vec<f64>, Error> {
        Ok(vec![self.slope(param.coordinate())?])
    }
}

/// Logs the best point of every iteration, clamped into the bounds.
struct IterationLog {
    recorder: Recorder,
    bounds: Bounds,
}

impl IterationLog {
    fn new(recorder: &Recorder, bounds: Bounds) -> Self {
        Self {
            recorder: recorder.clone(),
            bounds,
        }
    }
}

impl<I> Observe<I> for IterationLog
where
    I: State<Float = f64>,
    I::Param: Coordinate,
{
    fn observe_iter(&mut self, state: &I, _kv: &KV) -> Result<(), Error> {
        if let Some(best) = state.get_best_param() {
            let x = self.bounds.clamp(best.coordinate());
            let record = self.recorder.record_iteration(x, state.get_best_cost());
            debug!("iteration {}: x = {}, f(x) = {}", state.get_iter(), record.x, record.y);
        }
        Ok(())
    }
}

/// A signed step of size `h` from `x` that stays inside the bounds.
///
/// Forward if it fits, backward if that fits instead, otherwise as far as the
/// room towards the farther bound allows.
fn step_within(bounds: Bounds, x: f64, h: f64) -> f64 {
    let ahead = bounds.upper() - x;
    let behind = x - bounds.lower();
    if h <= ahead {
        h
    } else if h <= behind {
        -h
    } else if ahead >= behind {
        ahead
    } else {
        -behind
    }
}

#[allow(clippy::cast_possible_truncation)]
fn outcome<I>(bounds: Bounds, x0: f64, state: &I) -> Outcome
where
    I: State<Float = f64>,
    I::Param: Coordinate,
{
    let status = match state.get_termination_reason() {
        Some(TerminationReason::SolverConverged | TerminationReason::TargetCostReached) => {
            Status::Converged
        }
        Some(TerminationReason::MaxItersReached) => Status::MaxIters,
        _ => Status::Stalled,
    };
    let x = state.get_best_param().map_or(x0, |best| best.coordinate());
    Outcome {
        status,
        x: bounds.clamp(x),
        objective: state.get_best_cost(),
        iters: state.get_iter() as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optview_expr::Expression;

    fn recorder(source: &str) -> Recorder {
        Recorder::new(Expression::parse(source).unwrap())
    }

    fn inside(bounds: Bounds, records: &[Record]) -> bool {
        records.iter().all(|record| bounds.contains(record.x))
    }

    #[test]
    fn steps_fit_inside_the_bounds() {
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        assert_relative_eq!(step_within(bounds, 0.5, 0.1), 0.1);
        assert_relative_eq!(step_within(bounds, 0.95, 0.1), -0.1);
        // Neither side has room for the full step.
        assert_relative_eq!(step_within(bounds, 0.3, 2.0), 0.7);
        assert_relative_eq!(step_within(bounds, 0.8, 2.0), -0.8);
    }

    #[test]
    fn objective_clamps_and_remembers_the_last_point() {
        let recorder = recorder("x^2");
        let bounds = Bounds::new(-1.0, 2.0).unwrap();
        let objective = BoundedObjective::<f64>::new(&recorder, bounds);

        assert_relative_eq!(objective.cost(&5.0).unwrap(), 4.0);
        assert_relative_eq!(objective.cost(&2.0).unwrap(), 4.0);
        assert_relative_eq!(objective.cost(&-0.5).unwrap(), 0.25);
        assert_eq!(
            recorder.evaluations(),
            [Record::new(2.0, 4.0), Record::new(-0.5, 0.25)]
        );
    }

    #[test]
    fn slope_is_flat_outside_the_bounds() {
        let recorder = recorder("3 * x");
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        let objective = BoundedObjective::<Vec<f64>>::new(&recorder, bounds);

        assert_eq!(objective.gradient(&vec![4.0]).unwrap(), [0.0]);
        assert!(recorder.evaluations().is_empty());
        assert_relative_eq!(objective.gradient(&vec![0.5]).unwrap()[0], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn slope_stays_inside_intervals_narrower_than_the_step() {
        let recorder = recorder("sqrt(x)");
        let bounds = Bounds::new(0.0, 1e-9).unwrap();
        let objective = BoundedObjective::<Vec<f64>>::new(&recorder, bounds);

        let slope = objective.gradient(&vec![2e-10]).unwrap()[0];
        assert!(slope.is_finite() && slope > 0.0);
        let evaluations = recorder.evaluations();
        assert_eq!(evaluations.len(), 2);
        assert!(inside(bounds, &evaluations));
    }

    #[test]
    fn lbfgs_never_evaluates_outside_tight_bounds() {
        let cases = [("x^2", 1.0, 1.0 + 1e-9, 1.0 + 5e-10), ("sqrt(x)", 0.0, 1e-9, 5e-10)];
        for (source, lower, upper, x0) in cases {
            let recorder = recorder(source);
            let bounds = Bounds::new(lower, upper).unwrap();
            let config = LbfgsConfig {
                max_iters: 50,
                memory: 10,
                fd_step: 1e-8,
                g_tol: 1e-5,
                f_tol: 2.2e-9,
            };

            let outcome = lbfgs(&recorder, bounds, x0, &config).unwrap();
            assert!(inside(bounds, &recorder.evaluations()), "{source}");
            assert!(bounds.contains(outcome.x), "{source}");
        }
    }

    #[test]
    fn lbfgs_stops_on_the_bound_nearest_the_minimum() {
        let recorder = recorder("x");
        let bounds = Bounds::new(1.0, 10.0).unwrap();
        let config = LbfgsConfig {
            max_iters: 100,
            memory: 10,
            fd_step: 1e-8,
            g_tol: 1e-5,
            f_tol: 2.2e-9,
        };

        let outcome = lbfgs(&recorder, bounds, 5.0, &config).unwrap();
        assert_relative_eq!(outcome.x, 1.0);
        assert!(inside(bounds, &recorder.evaluations()));
    }

    #[test]
    fn nelder_mead_converges_from_the_initial_point() {
        let recorder = recorder("(x - 2)^2");
        let bounds = Bounds::new(-5.0, 5.0).unwrap();
        let config = SimplexConfig {
            max_iters: 200,
            initial_step: 0.05,
            f_tol: 1e-10,
        };

        let outcome = nelder_mead(&recorder, bounds, 4.98, &config).unwrap();
        assert_eq!(outcome.status, Status::Converged);
        assert_relative_eq!(outcome.x, 2.0, epsilon = 1e-3);

        let evaluations = recorder.evaluations();
        assert_eq!(evaluations[0].x, 4.98);
        // No room for the second vertex above, so it steps back.
        assert_relative_eq!(evaluations[1].x, 4.93);
        assert_eq!(recorder.iterations().len(), outcome.iters);
    }

    #[test]
    fn line_search_starts_from_the_initial_point() {
        let bounds = Bounds::new(-5.0, 5.0).unwrap();
        let config = LineConfig {
            max_iters: 100,
            x_tol: 1e-4,
        };
        let first_two = |x0: f64| {
            let recorder = recorder("x^2 - x");
            line_search(&recorder, bounds, x0, &config).unwrap();
            let evaluations = recorder.evaluations();
            assert!(evaluations[..2].iter().any(|record| record.x == x0));
            (evaluations[0], evaluations[1])
        };

        assert_ne!(first_two(-2.0), first_two(1.0));
    }

    #[test]
    fn failing_objectives_abort_the_run() {
        let recorder = recorder("ln(x)");
        let bounds = Bounds::new(-1.0, 1.0).unwrap();
        let config = SimplexConfig {
            max_iters: 50,
            initial_step: 0.05,
            f_tol: 1e-8,
        };

        assert!(nelder_mead(&recorder, bounds, -0.5, &config).is_err());
        assert!(recorder.evaluations().is_empty());
    }
}
