use std::sync::LazyLock;

use pest::{
    Parser,
    error::InputLocation,
    iterators::{Pair, Pairs},
    pratt_parser::{Assoc, Op, PrattParser},
};
use pest_derive::Parser;

use crate::{
    ExpressionError,
    ast::{BinaryOp, Function, Node},
};

#[derive(Parser)]
#[grammar = "expression.pest"]
struct ExpressionParser;

/// Operator precedence, lowest first.
///
/// Unary minus sits below `^` so that `-x^2` reads as `-(x^2)`.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left))
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos))
        .op(Op::infix(Rule::pow, Assoc::Right))
});

/// Parses source text into an expression tree.
pub(crate) fn parse(source: &str) -> Result<Node, ExpressionError> {
    if source.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut pairs = ExpressionParser::parse(Rule::expression, source).map_err(syntax_error)?;
    let expr = pairs.next().ok_or(ExpressionError::Empty)?;
    build(expr.into_inner())
}

fn syntax_error(err: pest::error::Error<Rule>) -> ExpressionError {
    let position = match err.location {
        InputLocation::Pos(pos) | InputLocation::Span((pos, _)) => pos,
    };
    ExpressionError::Syntax {
        position,
        message: err.variant.message().into_owned(),
    }
}

fn build(pairs: Pairs<'_, Rule>) -> Result<Node, ExpressionError> {
    PRATT
        .map_primary(build_primary)
        .map_prefix(|op, rhs| {
            let rhs = rhs?;
            Ok(match op.as_rule() {
                Rule::neg => Node::Neg(Box::new(rhs)),
                _ => rhs,
            })
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::sub => BinaryOp::Sub,
                Rule::mul => BinaryOp::Mul,
                Rule::div => BinaryOp::Div,
                _ => BinaryOp::Pow,
            };
            Ok(Node::Binary {
                op,
                lhs: Box::new(lhs?),
                rhs: Box::new(rhs?),
            })
        })
        .parse(pairs)
}

fn build_primary(pair: Pair<'_, Rule>) -> Result<Node, ExpressionError> {
    match pair.as_rule() {
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(Node::Number)
            .map_err(|e| ExpressionError::Syntax {
                position: pair.as_span().start(),
                message: e.to_string(),
            }),
        Rule::ident => match pair.as_str() {
            "x" => Ok(Node::Var),
            "pi" => Ok(Node::Number(std::f64::consts::PI)),
            "e" => Ok(Node::Number(std::f64::consts::E)),
            other => Err(ExpressionError::UnknownVariable(other.to_owned())),
        },
        Rule::call => {
            let mut inner = pair.into_inner();
            let (Some(name), Some(arg)) = (inner.next(), inner.next()) else {
                return Err(ExpressionError::Empty);
            };
            let function = Function::from_name(name.as_str())
                .ok_or_else(|| ExpressionError::UnknownFunction(name.as_str().to_owned()))?;
            Ok(Node::Call {
                function,
                arg: Box::new(build(arg.into_inner())?),
            })
        }
        _ => build(pair.into_inner()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval(source: &str, x: f64) -> f64 {
        parse(source).expect("should parse").eval(x)
    }

    #[test]
    fn respects_precedence() {
        assert_relative_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0), 1.0);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        assert_relative_eq!(eval("2^3^2", 0.0), 512.0);
        assert_relative_eq!(eval("2**3", 0.0), 8.0);
        assert_relative_eq!(eval("-x^2", 3.0), -9.0);
        assert_relative_eq!(eval("(-x)^2", 3.0), 9.0);
    }

    #[test]
    fn reads_literals_and_constants() {
        assert_relative_eq!(eval("1.5e2", 0.0), 150.0);
        assert_relative_eq!(eval(".5", 0.0), 0.5);
        assert_relative_eq!(eval("pi", 0.0), std::f64::consts::PI);
        assert_relative_eq!(eval("2 * e", 0.0), 2.0 * std::f64::consts::E);
        assert_relative_eq!(eval("+x", 4.0), 4.0);
    }

    #[test]
    fn calls_functions() {
        assert_relative_eq!(eval("sin(x)", 0.0), 0.0);
        assert_relative_eq!(eval("cos(0)", 0.0), 1.0);
        assert_relative_eq!(eval("exp(ln(x))", 2.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(abs(x))", -16.0), 4.0);
    }

    #[test]
    fn rejects_trailing_operator() {
        let err = parse("x +").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { .. }), "{err:?}");
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            parse("y + 1").unwrap_err(),
            ExpressionError::UnknownVariable("y".into())
        );
        assert_eq!(
            parse("system(x)").unwrap_err(),
            ExpressionError::UnknownFunction("system".into())
        );
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(parse("   ").unwrap_err(), ExpressionError::Empty);
    }

    #[test]
    fn rejects_code_like_input() {
        assert!(parse("__import__('os')").is_err());
        assert!(parse("x; 1").is_err());
        assert!(parse("np.sin(x)").is_err());
    }
}
