use std::convert::Infallible;

/// Defines a scalar minimization problem to be solved.
///
/// A minimization problem maps the solver variable `x` to a model input,
/// then computes an objective value from the model input and output.
/// Solvers search for the `x` that minimizes the objective.
pub trait MinimizationProblem {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps the solver variable `x` into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: f64) -> Result<Self::Input, Self::Error>;

    /// Computes an objective value from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be computed.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;
}

/// The problem for models that already are `f(x)`.
///
/// The solver variable is passed to the model unchanged and the model output
/// is the objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputObjective;

impl MinimizationProblem for OutputObjective {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: f64) -> Result<f64, Self::Error> {
        Ok(x)
    }

    fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn output_objective_passes_values_through() {
        let problem = OutputObjective;
        let input = problem.input(1.25).unwrap();
        assert_relative_eq!(input, 1.25);
        assert_relative_eq!(problem.objective(&input, &-3.5).unwrap(), -3.5);
    }
}
