use optview_core::{MinimizationProblem, Model, Observer, Snapshot};

use super::{Action, Error, Event, Point, Solution, Status, evaluate};

/// Result of a single objective probe.
pub(super) enum Probed {
    /// The objective value at the probed x.
    Value(f64),
    /// The observer asked to stop.
    Stop,
}

/// Evaluates the objective on behalf of a solver.
///
/// Every call emits the matching event, counts the evaluation, and keeps the
/// best successful evaluation for the final [`Solution`].
pub(super) struct Probe<'a, M, P, Obs>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    model: &'a M,
    problem: &'a P,
    observer: Obs,
    evals: usize,
    best: Option<(Point, Snapshot<M::Input, M::Output>)>,
}

impl<'a, M, P, Obs> Probe<'a, M, P, Obs>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'e> Observer<Event<'e, M, P>, Action>,
{
    pub(super) fn new(model: &'a M, problem: &'a P, observer: Obs) -> Self {
        Self {
            model,
            problem,
            observer,
            evals: 0,
            best: None,
        }
    }

    /// Evaluates the objective at `x` and notifies the observer.
    ///
    /// A failed evaluation is an error unless the observer stops the solver
    /// and an earlier evaluation succeeded.
    pub(super) fn eval(&mut self, x: f64) -> Result<Probed, Error> {
        self.evals += 1;
        match evaluate(self.model, self.problem, x) {
            Ok(eval) => {
                let point = Point::from(&eval);
                let event = Event::Evaluated {
                    point,
                    input: &eval.snapshot.input,
                    output: &eval.snapshot.output,
                };
                let action = self.observer.observe(&event);
                self.consider(point, eval.snapshot);
                match action {
                    Some(Action::StopEarly) => Ok(Probed::Stop),
                    None => Ok(Probed::Value(point.objective)),
                }
            }
            Err(err) => {
                let action = Event::emit_failure(x, &err, &mut self.observer);
                match action {
                    Some(Action::StopEarly) if self.best.is_some() => Ok(Probed::Stop),
                    _ => Err(err.into()),
                }
            }
        }
    }

    /// Reports a completed iteration, returning `true` if the observer asked to stop.
    pub(super) fn iterated(&mut self, iter: usize) -> bool {
        let Some((best, _)) = &self.best else {
            return false;
        };
        let event = Event::Iterated { iter, best: *best };
        matches!(self.observer.observe(&event), Some(Action::StopEarly))
    }

    /// Consumes the probe and builds the solution from the best evaluation.
    pub(super) fn finish(
        self,
        status: Status,
        iters: usize,
    ) -> Result<Solution<M::Input, M::Output>, Error> {
        let (point, snapshot) = self.best.ok_or(Error::NoEvaluation)?;
        Ok(Solution {
            status,
            x: point.x,
            objective: point.objective,
            snapshot,
            iters,
            evals: self.evals,
        })
    }

    fn consider(&mut self, point: Point, snapshot: Snapshot<M::Input, M::Output>) {
        let better = match &self.best {
            Some((best, _)) => point.objective < best.objective,
            None => true,
        };
        if better {
            self.best = Some((point, snapshot));
        }
    }
}
