//! Golden section search for bounded scalar minimization.
//!
//! # Algorithm
//!
//! Golden section search finds the minimum of a unimodal function on a bounded
//! interval. It maintains two interior points positioned by the golden ratio,
//! compares their objectives, and shrinks the bracket toward the better point.
//! Each iteration costs exactly one new evaluation.
//!
//! The search always starts from the full bounds, so it has no use for an
//! initial point.
//!
//! # Limitations
//!
//! - **Derivative-free**: Slower convergence than gradient-based methods
//! - **Unimodal assumption**: May find a local minimum if several exist
//!
//! # Observer Events
//!
//! The two interior points are evaluated before the first iteration, then one
//! point per iteration. Each evaluation emits [`Event::Evaluated`] and each
//! shrink emits [`Event::Iterated`].
//!
//! [`Event::Evaluated`]: super::Event::Evaluated
//! [`Event::Iterated`]: super::Event::Iterated

mod bracket;
mod config;
mod state;


pub use config::{Config, ConfigError};

use optview_core::{MinimizationProblem, Model, Observer};

use super::{
    Action, Bounds, Error, Event, Point, Solution, Status,
    probe::{Probe, Probed},
};
use bracket::GoldenBracket;
use state::State;

/// Finds the minimum of the objective within `bounds` using golden section search.
///
/// The observer receives an [`Event`] for every evaluation and iteration.
/// See the [module docs](self) for details on event timing.
///
/// # Errors
///
/// Returns an error if the model or problem fails during evaluation
/// and the observer does not stop the search.
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    bounds: Bounds,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bracket = GoldenBracket::new(bounds);
    let mut probe = Probe::new(model, problem, observer);

    let Probed::Value(left) = probe.eval(bracket.inner_left)? else {
        return probe.finish(Status::StoppedByObserver, 0);
    };
    let Probed::Value(right) = probe.eval(bracket.inner_right)? else {
        return probe.finish(Status::StoppedByObserver, 0);
    };

    let mut state = State::new(
        bracket,
        Point::new(bracket.inner_left, left),
        Point::new(bracket.inner_right, right),
    );

    for iter in 1..=config.max_iters() {
        let direction = state.next_action();
        let x = direction.x();

        let Probed::Value(objective) = probe.eval(x)? else {
            return probe.finish(Status::StoppedByObserver, iter - 1);
        };
        state.apply(direction, Point::new(x, objective));

        if probe.iterated(iter) {
            return probe.finish(Status::StoppedByObserver, iter);
        }
        if state.is_converged(config) {
            return probe.finish(Status::Converged, iter);
        }
    }

    probe.finish(Status::MaxIters, config.max_iters())
}

/// Finds the minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the model or problem fails during evaluation.
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    bounds: Bounds,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, bounds, config, ())
}
