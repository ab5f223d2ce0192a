use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::CallArgs;
use crate::error::EvalError;

pub type NativeFunction = Arc<dyn Fn(&CallArgs) -> Result<Value, EvalError> + Send + Sync>;

/// A value an expression can evaluate to: a number, a callable, or a map
/// of named members.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    Function(NativeFunction),
    Map(HashMap<String, Value>),
}

impl Value {
    /// Wraps a closure or fn item as a callable value.
    pub fn function<F>(function: F) -> Self
    where
        F: Fn(&CallArgs) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Value::Function(Arc::new(function))
    }

    pub fn as_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::Type(format!(
                "expected a number, got a {}",
                other.kind()
            ))),
        }
    }

    /// Numeric value that must be integral (bitwise operands).
    pub fn as_integer(&self) -> Result<i64, EvalError> {
        let n = self.as_number()?;
        if n.fract() != 0.0 {
            return Err(EvalError::Type(format!(
                "expected an integral operand, got {}",
                n
            )));
        }
        Ok(n as i64)
    }

    /// Member lookup. Only maps expose members, and exactly their keys.
    pub fn attribute(&self, name: &str) -> Result<Value, EvalError> {
        match self {
            Value::Map(map) => map
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::Attribute(name.to_string())),
            other => Err(EvalError::Type(format!(
                "a {} has no attributes",
                other.kind()
            ))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Function(_) => f.write_str("Function(<native>)"),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
