use thiserror::Error;

/// Everything that can go wrong while parsing or evaluating an expression.
///
/// The parser only produces [`EvalError::Syntax`]; the remaining kinds come
/// out of evaluation. Errors raised inside a bound callable propagate
/// through the evaluator unwrapped.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("name '{0}' is not defined")]
    Name(String),
    #[error("type error: {0}")]
    Type(String),
    #[error("unknown attribute '{0}'")]
    Attribute(String),
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    #[error("math domain error: {0}")]
    Domain(String),
    #[error("expression nesting exceeds the depth limit of {0}")]
    Depth(usize),
}
