use std::collections::HashMap;

use crate::ast::Value;
use crate::error::EvalError;
use crate::functions::Builtins;

/// Names starting with this prefix never resolve through the fallback
/// namespace, even when it would know them.
pub const RESERVED_PREFIX: char = '_';

/// Mutable name-to-value bindings plus an optional builtin fallback
/// namespace.
///
/// One instance is meant to live across many parse/evaluate cycles, with the
/// caller rebinding individual names between evaluations (the Newton solver
/// rebinds `x` each iteration). Not synchronized: at most one evaluation may
/// be in flight per instance.
pub struct Environment {
    bindings: HashMap<String, Value>,
    builtins: Option<Builtins>,
}

impl Environment {
    /// An environment with the builtin fallback namespace enabled.
    pub fn new(bindings: HashMap<String, Value>) -> Self {
        Self {
            bindings,
            builtins: Some(Builtins::standard()),
        }
    }

    /// An environment that resolves explicit bindings only.
    pub fn without_builtins(bindings: HashMap<String, Value>) -> Self {
        Self {
            bindings,
            builtins: None,
        }
    }

    pub fn builtins_enabled(&self) -> bool {
        self.builtins.is_some()
    }

    /// Overwrites a single binding.
    pub fn set(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Resolves a name.
    ///
    /// Explicit bindings win; after a miss, reserved-prefix names are
    /// rejected before the builtin table is ever consulted.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }
        if name.starts_with(RESERVED_PREFIX) {
            return Err(EvalError::Name(name.to_string()));
        }
        match &self.builtins {
            Some(builtins) => builtins
                .lookup(name)
                .cloned()
                .ok_or_else(|| EvalError::Name(name.to_string())),
            None => Err(EvalError::Name(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_binding_resolves() {
        let env = Environment::without_builtins(HashMap::from([(
            "r".to_string(),
            Value::Number(3.4),
        )]));
        assert_eq!(env.get("r").unwrap(), Value::Number(3.4));
    }

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::without_builtins(HashMap::new());
        env.set("x", Value::Number(1.0));
        env.set("x", Value::Number(2.0));
        assert_eq!(env.get("x").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_miss_without_builtins_is_name_error() {
        let env = Environment::without_builtins(HashMap::new());
        assert!(matches!(env.get("sqrt"), Err(EvalError::Name(_))));
        assert!(!env.builtins_enabled());
    }

    #[test]
    fn test_builtin_fallback_on_miss() {
        let env = Environment::new(HashMap::new());
        assert!(env.builtins_enabled());
        assert!(env.get("sqrt").is_ok());
        assert!(matches!(env.get("no_such_name"), Err(EvalError::Name(_))));
    }

    #[test]
    fn test_reserved_prefix_blocks_fallback() {
        let env = Environment::new(HashMap::new());
        assert!(matches!(env.get("_pi"), Err(EvalError::Name(_))));
    }

    #[test]
    fn test_reserved_prefix_allowed_when_explicitly_bound() {
        let env = Environment::new(HashMap::from([(
            "_hidden".to_string(),
            Value::Number(7.0),
        )]));
        assert_eq!(env.get("_hidden").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_explicit_binding_shadows_builtin() {
        let env = Environment::new(HashMap::from([(
            "pi".to_string(),
            Value::Number(3.0),
        )]));
        assert_eq!(env.get("pi").unwrap(), Value::Number(3.0));
    }
}
