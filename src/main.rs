use std::collections::HashMap;

use solvix_rs::ast::Value;
use solvix_rs::environment::Environment;
use solvix_rs::functions::{exponential, trigonometry};
use solvix_rs::solver::NewtonSolver;

fn main() {
    pretty_env_logger::init();

    let mut env = Environment::new(HashMap::from([
        ("ln".to_string(), Value::function(exponential::log)),
        ("log".to_string(), Value::function(exponential::log10)),
        ("sin".to_string(), Value::function(trigonometry::sin)),
        ("arcsin".to_string(), Value::function(trigonometry::asin)),
        ("root".to_string(), Value::function(exponential::sqrt)),
        ("pi".to_string(), Value::Number(std::f64::consts::PI)),
    ]));

    let solver = NewtonSolver::new("x^2", "2*x").expect("solver expressions must parse");

    match solver.solve(&mut env, 1.0) {
        Ok(root) => println!("{}", root),
        Err(err) => eprintln!("Error: {}", err),
    }
}
