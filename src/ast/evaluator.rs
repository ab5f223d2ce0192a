use std::collections::HashMap;

use crate::ast::{AstNode, CallArgs, Value};
use crate::environment::Environment;
use crate::error::EvalError;

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tree-walking evaluator.
///
/// Stateless apart from its recursion limit; the same instance can evaluate
/// any number of ASTs against any number of environments.
pub struct Evaluator {
    max_depth: usize,
}

impl Evaluator {
    /// Creates an evaluator with the given maximum AST depth.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Evaluates an AST node against an environment.
    ///
    /// The walk is post-order: children are evaluated before their operator
    /// or callee is applied. For binary operations the left operand is
    /// evaluated strictly before the right one, and call arguments are
    /// evaluated left to right; this is observable when bound callables have
    /// side effects.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` if evaluation succeeds.
    /// * `Err(EvalError)` on unresolvable names, type mismatches, arithmetic
    ///   failures, or any error raised by an invoked callable.
    pub fn evaluate(&self, node: &AstNode, env: &Environment) -> Result<Value, EvalError> {
        self.eval_node(node, env, 0)
    }

    fn eval_node(
        &self,
        node: &AstNode,
        env: &Environment,
        depth: usize,
    ) -> Result<Value, EvalError> {
        if depth >= self.max_depth {
            return Err(EvalError::Depth(self.max_depth));
        }

        match node {
            AstNode::Number(n) => Ok(Value::Number(*n)),

            AstNode::Identifier(name) => env.get(name),

            AstNode::UnaryOperation { operator, operand } => {
                let value = self.eval_node(operand, env, depth + 1)?;
                operator.apply(value)
            }

            AstNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.eval_node(left, env, depth + 1)?;
                let right_value = self.eval_node(right, env, depth + 1)?;
                operator.apply(left_value, right_value)
            }

            AstNode::AttributeAccess { target, attribute } => {
                let base = self.eval_node(target, env, depth + 1)?;
                base.attribute(attribute)
            }

            AstNode::FunctionCall {
                callee,
                args,
                kwargs,
            } => {
                let callee_value = self.eval_node(callee, env, depth + 1)?;

                let mut positional = Vec::with_capacity(args.len());
                for arg in args {
                    positional.push(self.eval_node(arg, env, depth + 1)?);
                }
                let mut keyword = HashMap::with_capacity(kwargs.len());
                for (name, value_node) in kwargs {
                    keyword.insert(name.clone(), self.eval_node(value_node, env, depth + 1)?);
                }

                match callee_value {
                    Value::Function(function) => function(&CallArgs::new(positional, keyword)),
                    other => Err(EvalError::Type(format!(
                        "a {} is not callable",
                        other.kind()
                    ))),
                }
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
