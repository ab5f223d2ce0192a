use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use solvix_macros::solvix_fn;

use crate::functions::Builtins;

pub fn register(builtins: &mut Builtins) {
    builtins.register_function("floor", floor);
    builtins.register_function("ceil", ceil);
    builtins.register_function("trunc", trunc);
    builtins.register_function("fabs", fabs);
    builtins.register_function("fmod", fmod);
}

#[solvix_fn]
fn floor(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.floor()))
}

#[solvix_fn]
fn ceil(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.ceil()))
}

#[solvix_fn]
fn trunc(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.trunc()))
}

#[solvix_fn]
fn fabs(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.abs()))
}

/// Truncated-division remainder, keeping the sign of the dividend.
#[solvix_fn]
fn fmod(x: f64, y: f64) -> Result<Value, EvalError> {
    if y == 0.0 {
        return Err(EvalError::Arithmetic("fmod by zero".to_string()));
    }
    Ok(Value::Number(x % y))
}
