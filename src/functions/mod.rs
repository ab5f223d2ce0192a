pub mod constants;
pub mod exponential;
pub mod rounding;
pub mod trigonometry;

use std::collections::HashMap;

use crate::ast::{CallArgs, Value};
use crate::error::EvalError;

/// The closed fallback namespace: a fixed table of named numeric constants
/// and functions, consulted only after an explicit-binding miss. Nothing
/// outside this table is reachable.
pub struct Builtins {
    entries: HashMap<String, Value>,
}

impl Builtins {
    /// The standard table, populated from every function family.
    pub fn standard() -> Self {
        let mut builtins = Self {
            entries: HashMap::new(),
        };
        constants::register(&mut builtins);
        exponential::register(&mut builtins);
        rounding::register(&mut builtins);
        trigonometry::register(&mut builtins);
        builtins
    }

    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&CallArgs) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.entries.insert(name.to_string(), Value::function(function));
    }

    pub fn register_constant(&mut self, name: &str, value: f64) {
        self.entries.insert(name.to_string(), Value::Number(value));
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }
}
