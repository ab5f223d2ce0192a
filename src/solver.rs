use log::debug;

use crate::ast::{AstNode, Evaluator, ExprParser, Value};
use crate::environment::Environment;
use crate::error::EvalError;

pub const EPSILON: f64 = 1e-10;
pub const MAX_ITERATIONS: u32 = 30;

/// The name the solver rebinds in the environment before each evaluation.
pub const VARIABLE: &str = "x";

/// Newton's-method root finder over a function and its derivative, both
/// given as expression strings.
///
/// Expressions may use `^` for exponentiation: it is rewritten to `**`
/// before parsing, so bitwise xor is not available inside solver
/// expressions. Both expressions are parsed once, up front.
///
/// The caller owns the environment; the solver only rebinds [`VARIABLE`]
/// between evaluations, so constants and functions placed there stay
/// available to the expressions.
pub struct NewtonSolver {
    function: AstNode,
    derivative: AstNode,
    epsilon: f64,
    max_iterations: u32,
}

impl NewtonSolver {
    pub fn new(function: &str, derivative: &str) -> Result<Self, EvalError> {
        let function = ExprParser::parse_expression(&rewrite_power_notation(function))?;
        let derivative = ExprParser::parse_expression(&rewrite_power_notation(derivative))?;
        Ok(Self {
            function,
            derivative,
            epsilon: EPSILON,
            max_iterations: MAX_ITERATIONS,
        })
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Iterates `x ← x - f(x)/f'(x)` from `initial` until `|f(x)|` drops
    /// below epsilon or the iteration cap is reached.
    ///
    /// The convergence test runs before any update, so hitting the cap
    /// returns the last estimate without signaling failure; a non-convergent
    /// sequence is indistinguishable from a converged one by the return
    /// value alone. A vanishing derivative is an error.
    pub fn solve(&self, env: &mut Environment, initial: f64) -> Result<f64, EvalError> {
        let evaluator = Evaluator::default();
        let mut x = initial;
        let mut iterations = 0;

        loop {
            env.set(VARIABLE, Value::Number(x));
            let fx = evaluator.evaluate(&self.function, env)?.as_number()?;
            debug!("iteration {}: x = {}, f(x) = {}", iterations, x, fx);

            if fx.abs() < self.epsilon || iterations >= self.max_iterations {
                return Ok(x);
            }

            let dfx = evaluator.evaluate(&self.derivative, env)?.as_number()?;
            if dfx == 0.0 {
                return Err(EvalError::Arithmetic(format!(
                    "derivative vanished at x = {}",
                    x
                )));
            }

            x -= fx / dfx;
            iterations += 1;
        }
    }
}

/// Maps the `^`-as-power convention onto the parser's `**` operator.
pub fn rewrite_power_notation(expression: &str) -> String {
    expression.replace('^', "**")
}
