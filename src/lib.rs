pub mod ast;
pub mod environment;
pub mod error;
pub mod functions;
pub mod solver;

pub use ast::{AstNode, Evaluator, ExprParser, Value};
pub use environment::Environment;
pub use error::EvalError;
pub use solver::NewtonSolver;

/// Parses and evaluates an expression in one call, expecting a numeric
/// result.
pub fn evaluate_expression(expression: &str, env: &Environment) -> Result<f64, EvalError> {
    let ast = ExprParser::parse_expression(expression)?;
    Evaluator::default().evaluate(&ast, env)?.as_number()
}
