//! Bounded single-variable golden section search for optview.
//!
//! The solver takes a [`Model`](optview_core::Model), a
//! [`MinimizationProblem`](optview_core::MinimizationProblem), validated
//! [`Bounds`](optimization::Bounds), and an [`Observer`](optview_core::Observer)
//! that hears about each objective evaluation and each completed iteration.

pub mod optimization;
