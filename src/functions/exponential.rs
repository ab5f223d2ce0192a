use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use solvix_macros::solvix_fn;

use crate::functions::Builtins;

pub fn register(builtins: &mut Builtins) {
    builtins.register_function("exp", exp);
    builtins.register_function("log", log);
    builtins.register_function("log10", log10);
    builtins.register_function("log2", log2);
    builtins.register_function("sqrt", sqrt);
    builtins.register_function("pow", pow);
}

#[solvix_fn]
fn exp(x: f64) -> Result<Value, EvalError> {
    Ok(Value::Number(x.exp()))
}

/// Natural logarithm, or `log(x, base)` with an explicit base.
pub fn log(args: &CallArgs) -> Result<Value, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::Type(format!(
            "log() expects 1 or 2 argument(s), got {}",
            args.len()
        )));
    }
    let x = args.resolve_number(0, "x")?;
    if x <= 0.0 {
        return Err(EvalError::Domain(format!("log argument {} must be positive", x)));
    }
    if args.len() == 2 {
        let base = args.resolve_number(1, "base")?;
        if base <= 0.0 || base == 1.0 {
            return Err(EvalError::Domain(format!("invalid logarithm base {}", base)));
        }
        Ok(Value::Number(x.ln() / base.ln()))
    } else {
        Ok(Value::Number(x.ln()))
    }
}

#[solvix_fn]
fn log10(x: f64) -> Result<Value, EvalError> {
    if x <= 0.0 {
        return Err(EvalError::Domain(format!("log10 argument {} must be positive", x)));
    }
    Ok(Value::Number(x.log10()))
}

#[solvix_fn]
fn log2(x: f64) -> Result<Value, EvalError> {
    if x <= 0.0 {
        return Err(EvalError::Domain(format!("log2 argument {} must be positive", x)));
    }
    Ok(Value::Number(x.log2()))
}

#[solvix_fn]
fn sqrt(x: f64) -> Result<Value, EvalError> {
    if x < 0.0 {
        return Err(EvalError::Domain(format!("sqrt of negative value {}", x)));
    }
    Ok(Value::Number(x.sqrt()))
}

#[solvix_fn]
fn pow(x: f64, y: f64) -> Result<Value, EvalError> {
    if x == 0.0 && y < 0.0 {
        return Err(EvalError::Arithmetic(
            "zero cannot be raised to a negative power".to_string(),
        ));
    }
    if x < 0.0 && y.fract() != 0.0 {
        return Err(EvalError::Domain(format!(
            "negative base {} with fractional exponent {}",
            x, y
        )));
    }
    Ok(Value::Number(x.powf(y)))
}
