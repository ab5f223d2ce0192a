use std::collections::HashMap;

use crate::ast::Value;
use crate::error::EvalError;

/// Evaluated arguments of a call: positional values in source order plus
/// keyword values. A parameter is resolved by positional index first, then
/// by keyword name; supplying both is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: HashMap<String, Value>,
}

impl CallArgs {
    pub fn new(positional: Vec<Value>, keyword: HashMap<String, Value>) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    /// Total argument count, positional and keyword together.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Resolves the parameter at `index`, also reachable by keyword `name`.
    pub fn resolve(&self, index: usize, name: &str) -> Result<&Value, EvalError> {
        if index < self.positional.len() {
            if self.keyword.contains_key(name) {
                return Err(EvalError::Type(format!(
                    "got multiple values for argument '{}'",
                    name
                )));
            }
            return Ok(&self.positional[index]);
        }
        self.keyword
            .get(name)
            .ok_or_else(|| EvalError::Type(format!("missing required argument '{}'", name)))
    }

    pub fn resolve_number(&self, index: usize, name: &str) -> Result<f64, EvalError> {
        self.resolve(index, name)?.as_number()
    }
}
