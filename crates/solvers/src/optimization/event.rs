use optview_core::{MinimizationProblem, Model};

use super::{Action, EvalError, Point};

/// Events emitted by the minimizers.
///
/// Evaluation events arrive in the order the objective is called. Solvers
/// that probe the objective several times per iteration (line searches,
/// finite differences, simplex trial points) emit one evaluation event per
/// probe and a single [`Event::Iterated`] once the iteration completes.
pub enum Event<'a, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Successful evaluation of the objective.
    Evaluated {
        /// The evaluated point (x and objective).
        point: Point,
        /// The model input at this point.
        input: &'a M::Input,
        /// The model output at this point.
        output: &'a M::Output,
    },
    /// Model evaluation failed.
    ModelFailed {
        /// The x value where evaluation failed.
        x: f64,
        /// The model error.
        error: &'a M::Error,
    },
    /// Problem method failed (input construction or objective computation).
    ProblemFailed {
        /// The x value where evaluation failed.
        x: f64,
        /// The problem error.
        error: &'a P::Error,
    },
    /// An iteration completed.
    Iterated {
        /// One-based iteration number.
        iter: usize,
        /// The best point found so far.
        best: Point,
    },
}

impl<M, P> Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Returns the x value the event is about.
    ///
    /// For [`Event::Iterated`] this is the current best x.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Evaluated { point, .. } => point.x,
            Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => *x,
            Self::Iterated { best, .. } => best.x,
        }
    }

    /// Returns the objective carried by the event, or `f64::NAN` for failures.
    #[must_use]
    pub fn objective(&self) -> f64 {
        match self {
            Self::Evaluated { point, .. } => point.objective,
            Self::Iterated { best, .. } => best.objective,
            Self::ModelFailed { .. } | Self::ProblemFailed { .. } => f64::NAN,
        }
    }

    /// Emits a failure event and returns the observer's action.
    pub(super) fn emit_failure<Obs>(
        x: f64,
        error: &EvalError<M::Error, P::Error>,
        observer: &mut Obs,
    ) -> Option<Action>
    where
        Obs: for<'a> optview_core::Observer<Event<'a, M, P>, Action>,
    {
        match error {
            EvalError::Model(e) => {
                let event = Event::ModelFailed { x, error: e };
                observer.observe(&event)
            }
            EvalError::Problem(e) => {
                let event = Event::ProblemFailed { x, error: e };
                observer.observe(&event)
            }
        }
    }
}
