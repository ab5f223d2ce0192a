mod call_args;
mod evaluator;
mod parser;
mod value;

pub use call_args::CallArgs;
pub use evaluator::{Evaluator, DEFAULT_MAX_DEPTH};
pub use parser::ExprParser;
pub use value::{NativeFunction, Value};

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Number(f64),
    Identifier(String),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<AstNode>,
    },
    BinaryOperation {
        left: Box<AstNode>,
        operator: BinaryOperator,
        right: Box<AstNode>,
    },
    AttributeAccess {
        target: Box<AstNode>,
        attribute: String,
    },
    FunctionCall {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        kwargs: Vec<(String, AstNode)>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
    BitXor,
    BitOr,
    BitAnd,
}

impl BinaryOperator {
    /// Applies the operator to two evaluated operands.
    ///
    /// All operators require numeric operands. The bitwise family
    /// additionally requires integral values and runs over `i64`.
    pub fn apply(&self, left: Value, right: Value) -> Result<Value, EvalError> {
        match self {
            BinaryOperator::BitXor | BinaryOperator::BitOr | BinaryOperator::BitAnd => {
                let a = left.as_integer()?;
                let b = right.as_integer()?;
                let bits = match self {
                    BinaryOperator::BitXor => a ^ b,
                    BinaryOperator::BitOr => a | b,
                    BinaryOperator::BitAnd => a & b,
                    _ => unreachable!(),
                };
                Ok(Value::Number(bits as f64))
            }
            _ => {
                let a = left.as_number()?;
                let b = right.as_number()?;
                let result = match self {
                    BinaryOperator::Add => a + b,
                    BinaryOperator::Subtract => a - b,
                    BinaryOperator::Multiply => a * b,
                    BinaryOperator::Divide => {
                        if b == 0.0 {
                            return Err(EvalError::Arithmetic("division by zero".to_string()));
                        }
                        a / b
                    }
                    BinaryOperator::FloorDivide => {
                        if b == 0.0 {
                            return Err(EvalError::Arithmetic(
                                "floor division by zero".to_string(),
                            ));
                        }
                        (a / b).floor()
                    }
                    BinaryOperator::Modulo => {
                        if b == 0.0 {
                            return Err(EvalError::Arithmetic("modulo by zero".to_string()));
                        }
                        // Remainder follows the sign of the divisor, matching
                        // the floor-division convention.
                        a - b * (a / b).floor()
                    }
                    BinaryOperator::Power => {
                        if a == 0.0 && b < 0.0 {
                            return Err(EvalError::Arithmetic(
                                "zero cannot be raised to a negative power".to_string(),
                            ));
                        }
                        if a < 0.0 && b.fract() != 0.0 {
                            return Err(EvalError::Domain(format!(
                                "negative base {} with fractional exponent {}",
                                a, b
                            )));
                        }
                        a.powf(b)
                    }
                    BinaryOperator::BitXor | BinaryOperator::BitOr | BinaryOperator::BitAnd => {
                        unreachable!()
                    }
                };
                Ok(Value::Number(result))
            }
        }
    }
}

impl TryFrom<&str> for BinaryOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" => Ok(BinaryOperator::Multiply),
            "/" => Ok(BinaryOperator::Divide),
            "//" => Ok(BinaryOperator::FloorDivide),
            "%" => Ok(BinaryOperator::Modulo),
            "**" => Ok(BinaryOperator::Power),
            "^" => Ok(BinaryOperator::BitXor),
            "|" => Ok(BinaryOperator::BitOr),
            "&" => Ok(BinaryOperator::BitAnd),
            _ => Err(EvalError::Syntax(format!("unknown operator: {}", value))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Identity,
}

impl UnaryOperator {
    pub fn apply(&self, operand: Value) -> Result<Value, EvalError> {
        let n = operand.as_number()?;
        match self {
            UnaryOperator::Negate => Ok(Value::Number(-n)),
            UnaryOperator::Identity => Ok(Value::Number(n)),
        }
    }
}
