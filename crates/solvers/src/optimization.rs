//! Bounded scalar minimization.
//!
//! A [`MinimizationProblem`] maps the solver variable `x` to a model input,
//! calls the model, and extracts a scalar objective. The [`golden_section`]
//! solver searches the bounds for the `x` that minimizes that objective.
//!
//! # Observer Events
//!
//! Solvers report through one [`Event`] type. Every objective evaluation emits
//! [`Event::Evaluated`] (or a failure event) in call order, and every completed
//! iteration emits [`Event::Iterated`] with the best point found so far. The
//! solver runs at least one iteration, so a successful solve always reports at
//! least one `Iterated` event and at least as many evaluations as iterations.
//!
//! Observers may return [`Action::StopEarly`] from any event to halt with the
//! best point found so far.
//!
//! [`MinimizationProblem`]: optview_core::MinimizationProblem

mod action;
mod bounds;
mod error;
mod evaluate;
mod event;
mod point;
mod probe;
mod solution;

pub use action::Action;
pub use bounds::{Bounds, BoundsError};
pub use error::Error;
pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
pub use event::Event;
pub use point::Point;
pub use solution::{Solution, Status};

pub mod golden_section;
