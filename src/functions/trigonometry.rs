use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use solvix_macros::solvix_fn;

use crate::functions::Builtins;

pub fn register(builtins: &mut Builtins) {
    builtins.register_function("sin", sin);
    builtins.register_function("cos", cos);
    builtins.register_function("tan", tan);
    builtins.register_function("asin", asin);
    builtins.register_function("acos", acos);
    builtins.register_function("atan", atan);
    builtins.register_function("atan2", atan2);
    builtins.register_function("sinh", sinh);
    builtins.register_function("cosh", cosh);
    builtins.register_function("tanh", tanh);
    builtins.register_function("degrees", degrees);
    builtins.register_function("radians", radians);
}

#[solvix_fn]
fn sin(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.sin()))
}

#[solvix_fn]
fn cos(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.cos()))
}

#[solvix_fn]
fn tan(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.tan()))
}

#[solvix_fn]
fn asin(x: f64) -> Result<Value, EvalError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(EvalError::Domain(format!("asin argument {} out of range", x)));
    }
    Ok(Value::Number(x.asin()))
}

#[solvix_fn]
fn acos(x: f64) -> Result<Value, EvalError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(EvalError::Domain(format!("acos argument {} out of range", x)));
    }
    Ok(Value::Number(x.acos()))
}

#[solvix_fn]
fn atan(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.atan()))
}

#[solvix_fn]
fn atan2(y: f64, x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(y.atan2(x)))
}

#[solvix_fn]
fn sinh(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.sinh()))
}

#[solvix_fn]
fn cosh(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.cosh()))
}

#[solvix_fn]
fn tanh(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.tanh()))
}

#[solvix_fn]
fn degrees(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.to_degrees()))
}

#[solvix_fn]
fn radians(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.to_radians()))
}
