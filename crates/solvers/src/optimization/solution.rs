use optview_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// Stopped for any other reason, such as a failed line search.
    Stalled,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a minimization.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,
    /// Best estimate of the minimizer.
    pub x: f64,
    /// Objective value at the reported x.
    pub objective: f64,
    /// Snapshot at the reported x.
    pub snapshot: Snapshot<I, O>,
    /// Number of completed iterations.
    pub iters: usize,
    /// Number of objective evaluations, failed ones included.
    pub evals: usize,
}
