use std::fmt;

/// Binary operators supported by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Written `^` or `**`.
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// One-argument functions that may appear in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm, callable as `ln` or `log`.
    Ln,
    Log10,
    Sqrt,
    Abs,
}

impl Function {
    /// Every supported function, in the order shown to users.
    pub const ALL: [Function; 14] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Ln,
        Self::Log10,
        Self::Sqrt,
        Self::Abs,
    ];

    /// Looks up a function by the name used in expressions.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(function)
    }

    /// The canonical name of the function.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Sqrt => v.sqrt(),
            Self::Abs => v.abs(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Var,
    Neg(Box<Node>),
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        function: Function,
        arg: Box<Node>,
    },
}

impl Node {
    /// Evaluates the tree with `x` bound to the free variable.
    ///
    /// NaN propagates through every operation, so callers only need to check
    /// the final value.
    pub(crate) fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Self::Call { function, arg } => function.apply(arg.eval(x)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_function_round_trips_through_its_name() {
        for function in Function::ALL {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
        assert_eq!(Function::from_name("log"), Some(Function::Ln));
        assert_eq!(Function::from_name("print"), None);
    }

    #[test]
    fn evaluates_nested_tree() {
        // -(x^2) + sqrt(x)
        let tree = Node::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Node::Neg(Box::new(Node::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(Node::Var),
                rhs: Box::new(Node::Number(2.0)),
            }))),
            rhs: Box::new(Node::Call {
                function: Function::Sqrt,
                arg: Box::new(Node::Var),
            }),
        };

        assert_relative_eq!(tree.eval(4.0), -14.0);
        assert!(tree.eval(-1.0).is_nan());
    }
}
