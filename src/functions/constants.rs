use crate::functions::Builtins;

pub fn register(builtins: &mut Builtins) {
    builtins.register_constant("pi", std::f64::consts::PI);
    builtins.register_constant("e", std::f64::consts::E);
    builtins.register_constant("tau", std::f64::consts::TAU);
    builtins.register_constant("inf", f64::INFINITY);
    builtins.register_constant("nan", f64::NAN);
}
