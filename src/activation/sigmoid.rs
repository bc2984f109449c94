use std::f64::consts::E;

/// Logistic sigmoid, `1 / (1 + e^-x)`.
///
/// Not clamped: for large `|x|` the result rounds to exactly 0.0 or 1.0.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of [`sigmoid`] at `x`.
pub fn sigmoid_gradient(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

pub fn sigmoid_all(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| sigmoid(x)).collect()
}

pub fn sigmoid_gradient_all(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| sigmoid_gradient(x)).collect()
}
