//! Optimizer names offered to the user and their options.
//!
//! Every name is listed so it can be picked, but only the methods that accept
//! bound constraints on a single variable are wired to a solver:
//!
//! | Method        | Solver                                                 |
//! |---------------|--------------------------------------------------------|
//! | `Nelder-Mead` | argmin `NelderMead` ([`bounded::nelder_mead`])         |
//! | `Powell`      | argmin line search from `x0` ([`bounded::line_search`]) |
//! | `L-BFGS-B`    | argmin `LBFGS` ([`bounded::lbfgs`])                    |
//! | `Golden`      | [`golden_section`] over the whole bounds               |
//!
//! Running any other method fails with [`OptimizationError::Unsupported`].

use std::{fmt, str::FromStr};

use optview_core::OutputObjective;
use optview_solvers::optimization::{Bounds, golden_section};

use crate::{
    ConfigurationError, OptimizationError, RunError,
    bounded::{self, LbfgsConfig, LineConfig, SimplexConfig},
    recorder::{Outcome, Recorder},
};

/// An optimizer the user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Slsqp,
    Cobyla,
    NelderMead,
    Powell,
    Cg,
    Bfgs,
    NewtonCg,
    LBfgsB,
    Tnc,
    TrustConstr,
    Dogleg,
    TrustNcg,
    TrustExact,
    TrustKrylov,
    Golden,
}

impl Method {
    /// Every method, in selector order.
    pub const ALL: [Method; 15] = [
        Method::Slsqp,
        Method::Cobyla,
        Method::NelderMead,
        Method::Powell,
        Method::Cg,
        Method::Bfgs,
        Method::NewtonCg,
        Method::LBfgsB,
        Method::Tnc,
        Method::TrustConstr,
        Method::Dogleg,
        Method::TrustNcg,
        Method::TrustExact,
        Method::TrustKrylov,
        Method::Golden,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Slsqp => "SLSQP",
            Self::Cobyla => "COBYLA",
            Self::NelderMead => "Nelder-Mead",
            Self::Powell => "Powell",
            Self::Cg => "CG",
            Self::Bfgs => "BFGS",
            Self::NewtonCg => "Newton-CG",
            Self::LBfgsB => "L-BFGS-B",
            Self::Tnc => "TNC",
            Self::TrustConstr => "trust-constr",
            Self::Dogleg => "dogleg",
            Self::TrustNcg => "trust-ncg",
            Self::TrustExact => "trust-exact",
            Self::TrustKrylov => "trust-krylov",
            Self::Golden => "Golden",
        }
    }

    /// Whether running this method reaches a solver.
    #[must_use]
    pub fn is_wired(self) -> bool {
        matches!(
            self,
            Self::NelderMead | Self::Powell | Self::LBfgsB | Self::Golden
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}

/// A method name that matches no entry of [`Method::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown method `{0}`")]
pub struct UnknownMethod(pub String);

/// The value type an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Float,
    Int,
    /// One value per variable; a single value here.
    Array,
}

/// One named option of a method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodOption {
    pub name: &'static str,
    pub kind: OptionKind,
    /// `None` leaves the option unset.
    pub value: Option<f64>,
}

impl MethodOption {
    fn set(name: &'static str, kind: OptionKind, value: f64) -> Self {
        Self {
            name,
            kind,
            value: Some(value),
        }
    }

    fn unset(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            kind,
            value: None,
        }
    }
}

/// The option table of one method.
///
/// Wired methods start from their solver defaults. Unwired methods list their
/// option names with no values.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOptions {
    method: Method,
    entries: Vec<MethodOption>,
}

impl MethodOptions {
    /// The default option table for `method`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn defaults(method: Method) -> Self {
        use OptionKind::{Array, Float, Int};

        let entries = match method {
            Method::NelderMead => vec![
                MethodOption::set("maxiter", Int, 200.0),
                MethodOption::set("initial_step", Float, 0.05),
                MethodOption::set("fatol", Float, 1e-8),
            ],
            Method::Powell => vec![
                MethodOption::set("maxiter", Int, 100.0),
                MethodOption::set("xtol", Float, 1e-4),
            ],
            Method::Golden => {
                let d = golden_section::Config::default();
                vec![
                    MethodOption::set("maxiter", Int, d.max_iters() as f64),
                    MethodOption::set("xatol", Float, d.x_abs_tol()),
                    MethodOption::set("xrtol", Float, d.x_rel_tol()),
                ]
            }
            Method::LBfgsB => vec![
                MethodOption::set("maxiter", Int, 100.0),
                MethodOption::set("maxcor", Int, 10.0),
                MethodOption::set("eps", Float, 1e-8),
                MethodOption::set("gtol", Float, 1e-5),
                MethodOption::set("ftol", Float, 2.220_446_049_250_313e-9),
            ],
            Method::Slsqp => vec![
                MethodOption::unset("ftol", Float),
                MethodOption::unset("eps", Float),
                MethodOption::unset("maxiter", Int),
                MethodOption::unset("finite_diff_rel_step", Array),
            ],
            Method::Cobyla => vec![
                MethodOption::unset("rhobeg", Float),
                MethodOption::unset("tol", Float),
                MethodOption::unset("maxiter", Int),
                MethodOption::unset("catol", Float),
            ],
            _ => Vec::new(),
        };

        Self { method, entries }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn entries(&self) -> &[MethodOption] {
        &self.entries
    }

    /// The value of the named option, if it exists and is set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.value)
    }

    /// Sets the named option.
    ///
    /// Values are checked when the options are turned into a solver config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownOption`] if the method has no
    /// option with that name.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ConfigurationError> {
        let method = self.method;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ConfigurationError::UnknownOption {
                method,
                name: name.to_owned(),
            })?;
        entry.value = Some(value);
        Ok(())
    }

    /// Builds the solver this table configures.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError::Unsupported`] for unwired methods and a
    /// [`ConfigurationError`] for option values the solver rejects.
    pub(crate) fn solver(&self) -> Result<Solver, RunError> {
        let solver = match self.method {
            Method::NelderMead => Solver::NelderMead(SimplexConfig {
                max_iters: self.iterations("maxiter")?,
                initial_step: self.positive("initial_step")?,
                f_tol: self.positive("fatol")?,
            }),
            Method::Powell => Solver::Powell(LineConfig {
                max_iters: self.iterations("maxiter")?,
                x_tol: self.positive("xtol")?,
            }),
            Method::LBfgsB => Solver::LBfgsB(LbfgsConfig {
                max_iters: self.iterations("maxiter")?,
                memory: self.count("maxcor")?.max(1),
                fd_step: self.positive("eps")?,
                g_tol: self.positive("gtol")?,
                f_tol: self.positive("ftol")?,
            }),
            Method::Golden => Solver::GoldenSection(
                golden_section::Config::new(
                    self.count("maxiter")?,
                    self.float("xatol")?,
                    self.float("xrtol")?,
                )
                .map_err(ConfigurationError::from)?,
            ),
            method => return Err(OptimizationError::Unsupported(method).into()),
        };
        Ok(solver)
    }

    fn float(&self, name: &'static str) -> Result<f64, ConfigurationError> {
        self.get(name).ok_or(ConfigurationError::MissingOption { name })
    }

    fn positive(&self, name: &'static str) -> Result<f64, ConfigurationError> {
        let value = self.float(name)?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigurationError::NotPositive { name, value })
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count(&self, name: &'static str) -> Result<usize, ConfigurationError> {
        let value = self.float(name)?;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Ok(value as usize)
        } else {
            Err(ConfigurationError::NotACount { name, value })
        }
    }

    /// An iteration cap, which must allow at least one iteration.
    fn iterations(&self, name: &'static str) -> Result<u64, ConfigurationError> {
        match self.count(name)? {
            0 => Err(ConfigurationError::NotPositive { name, value: 0.0 }),
            n => Ok(n as u64),
        }
    }
}

/// A configured solver, ready to run on an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Solver {
    GoldenSection(golden_section::Config),
    NelderMead(SimplexConfig),
    Powell(LineConfig),
    LBfgsB(LbfgsConfig),
}

impl Solver {
    /// Minimizes the recorder's expression over `bounds`, starting from `x0`.
    ///
    /// Golden section search ignores `x0`. Every evaluation and iteration goes
    /// to `recorder`.
    pub(crate) fn minimize(
        &self,
        method: Method,
        recorder: &Recorder,
        x0: f64,
        bounds: Bounds,
    ) -> Result<Outcome, OptimizationError> {
        let library = |source| OptimizationError::Library { method, source };
        match self {
            Self::GoldenSection(config) => golden_section::minimize(
                recorder.expression(),
                &OutputObjective,
                bounds,
                config,
                recorder.clone(),
            )
            .map(|solution| Outcome::from(&solution))
            .map_err(|source| OptimizationError::Solver { method, source }),
            Self::NelderMead(config) => {
                bounded::nelder_mead(recorder, bounds, x0, config).map_err(library)
            }
            Self::Powell(config) => {
                bounded::line_search(recorder, bounds, x0, config).map_err(library)
            }
            Self::LBfgsB(config) => bounded::lbfgs(recorder, bounds, x0, config).map_err(library),
        }
    }
}
