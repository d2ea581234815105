//! Core traits and types shared across optview.
//!
//! This crate defines the abstractions that the solvers and the viewer build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`MinimizationProblem`]: adapts a scalar solver variable to a model input
//!   and extracts the objective from the model output

mod model;
mod observer;
mod problem;

pub use observer::Observer;
pub use problem::{MinimizationProblem, OutputObjective};
pub use {model::Model, model::Snapshot};
