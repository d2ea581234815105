//! Restricted single-variable math expressions.
//!
//! Objectives typed by a user are parsed with a fixed grammar instead of being
//! executed as code. The grammar covers numeric literals, the variable `x`,
//! the constants `pi` and `e`, the operators `+ - * /`, powers written `^` or
//! `**`, parentheses, and a closed set of one-argument functions (see
//! [`Function`]).
//!
//! ```
//! use optview_expr::Expression;
//!
//! let expr = Expression::parse("(sin(1/2 * x) + 2 * cos(1/2 * x)) * x^2").unwrap();
//! assert_eq!(expr.eval(0.0).unwrap(), 0.0);
//! ```
//!
//! A parsed [`Expression`] is a [`Model`](optview_core::Model) from `f64` to
//! `f64`, so it can be handed to a solver directly.

mod ast;
mod error;
mod expression;
mod grammar;

pub use ast::{BinaryOp, Function};
pub use error::ExpressionError;
pub use expression::{Expression, VALIDATION_SAMPLE};
