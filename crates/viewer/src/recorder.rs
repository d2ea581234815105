//! Turns solver activity into the logs a run is browsed through.

use std::{cell::RefCell, rc::Rc};

use log::{debug, info, warn};
use optview_core::{Observer, OutputObjective};
use optview_expr::{Expression, ExpressionError};
use optview_solvers::optimization::{Action, Event, Solution, Status};

use crate::{OptimizationError, RunConfig, RunError};

/// One point of a log: an input and the objective value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub x: f64,
    pub y: f64,
}

impl Record {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Accumulates the Evaluation Log and the Iteration Log of a run.
///
/// Every successful objective evaluation is appended to the evaluation log
/// in call order. Every completed iteration appends the solver's current
/// candidate, with `y` from evaluating the expression again at that `x`.
///
/// Clones share the same logs, so the objective handed to a solver and the
/// observer watching it can both write while the caller keeps a handle to
/// read back. The recorder never stops a solver.
#[derive(Debug, Clone)]
pub struct Recorder {
    shared: Rc<Shared>,
}

#[derive(Debug)]
struct Shared {
    expression: Expression,
    evaluations: RefCell<Vec<Record>>,
    iterations: RefCell<Vec<Record>>,
}

impl Recorder {
    #[must_use]
    pub fn new(expression: Expression) -> Self {
        Self {
            shared: Rc::new(Shared {
                expression,
                evaluations: RefCell::default(),
                iterations: RefCell::default(),
            }),
        }
    }

    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.shared.expression
    }

    /// Evaluates the expression at `x`, logging the evaluation if it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the expression error; nothing is logged in that case.
    pub fn evaluate(&self, x: f64) -> Result<f64, ExpressionError> {
        let y = self.shared.expression.eval(x)?;
        self.record_evaluation(x, y);
        Ok(y)
    }

    /// Appends an evaluation that was made elsewhere.
    pub fn record_evaluation(&self, x: f64, y: f64) {
        self.shared.evaluations.borrow_mut().push(Record::new(x, y));
    }

    /// Appends the candidate of a completed iteration.
    ///
    /// The expression is evaluated again at `x`; `objective` is only kept if
    /// that fails.
    pub fn record_iteration(&self, x: f64, objective: f64) -> Record {
        let y = self.shared.expression.eval(x).unwrap_or(objective);
        let record = Record::new(x, y);
        self.shared.iterations.borrow_mut().push(record);
        record
    }

    #[must_use]
    pub fn evaluations(&self) -> Vec<Record> {
        self.shared.evaluations.borrow().clone()
    }

    #[must_use]
    pub fn iterations(&self) -> Vec<Record> {
        self.shared.iterations.borrow().clone()
    }

    /// Freezes the logs together with the solver result.
    #[must_use]
    pub fn finish(self, outcome: Outcome) -> Recording {
        Recording {
            evaluations: self.shared.evaluations.take(),
            iterations: self.shared.iterations.take(),
            outcome,
        }
    }
}

impl Observer<Event<'_, Expression, OutputObjective>, Action> for Recorder {
    fn observe(&mut self, event: &Event<'_, Expression, OutputObjective>) -> Option<Action> {
        match event {
            Event::Evaluated { point, .. } => self.record_evaluation(point.x, point.objective),
            Event::Iterated { iter, best } => {
                let record = self.record_iteration(best.x, best.objective);
                debug!("iteration {iter}: x = {}, f(x) = {}", record.x, record.y);
            }
            Event::ModelFailed { x, error } => debug!("objective failed at x = {x}: {error}"),
            Event::ProblemFailed { error, .. } => match **error {},
        }
        None
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub status: Status,
    /// Best estimate of the minimizer, inside the bounds.
    pub x: f64,
    pub objective: f64,
    /// Number of completed iterations.
    pub iters: usize,
}

impl<I, O> From<&Solution<I, O>> for Outcome {
    fn from(solution: &Solution<I, O>) -> Self {
        Self {
            status: solution.status,
            x: solution.x,
            objective: solution.objective,
            iters: solution.iters,
        }
    }
}

/// The frozen logs of a completed run.
///
/// The evaluation log is never empty and holds at least as many records as
/// the iteration log.
#[derive(Debug, Clone)]
pub struct Recording {
    evaluations: Vec<Record>,
    iterations: Vec<Record>,
    outcome: Outcome,
}

impl Recording {
    /// Every objective evaluation, in call order.
    #[must_use]
    pub fn evaluations(&self) -> &[Record] {
        &self.evaluations
    }

    /// One record per solver iteration.
    #[must_use]
    pub fn iterations(&self) -> &[Record] {
        &self.iterations
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Runs the configured method on `expression` and records it.
///
/// Partial logs of a failed run are discarded.
///
/// # Errors
///
/// Returns a [`ConfigurationError`](crate::ConfigurationError) for options the
/// solver rejects, [`OptimizationError::Unsupported`] for unwired methods,
/// and another [`OptimizationError`] when the solver fails. Solver failures
/// are also logged at warn level.
pub fn run(expression: &Expression, config: &RunConfig) -> Result<Recording, RunError> {
    let method = config.method();
    let solver = config.options().solver()?;
    let bounds = config.bounds();
    let x0 = config.start().resolve(bounds);
    debug!(
        "running {method} on `{expression}` over [{}, {}] from x0 = {x0}",
        bounds.lower(),
        bounds.upper()
    );

    let recorder = Recorder::new(expression.clone());
    match solver.minimize(method, &recorder, x0, bounds) {
        Ok(outcome) => {
            let recording = recorder.finish(outcome);
            info!(
                "{method} finished ({:?}) at x = {}, f(x) = {} after {} iterations and {} evaluations",
                outcome.status,
                outcome.x,
                outcome.objective,
                outcome.iters,
                recording.evaluations().len()
            );
            Ok(recording)
        }
        Err(err) => {
            warn!("{err} (`{expression}`)");
            Err(err.into())
        }
    }
}
