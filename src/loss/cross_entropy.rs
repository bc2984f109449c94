use crate::network::network::Network;
use crate::propagation::forward::ForwardPass;

/// Output activations are clamped into `[EPS, 1 - EPS]` before `ln()` so a
/// saturated node gives a large finite cost instead of infinity.
pub const ACTIVATION_EPSILON: f64 = 1e-12;

/// Cross-entropy of one example against the one-hot target for `label`:
///   -Σ_k [k == label ? ln(a_k) : ln(1 - a_k)]
pub fn example_cost(pass: &ForwardPass, label: usize) -> f64 {
    pass.output()
        .iter()
        .enumerate()
        .map(|(k, &a)| {
            let a = a.clamp(ACTIVATION_EPSILON, 1.0 - ACTIVATION_EPSILON);
            if k == label { -a.ln() } else { -(1.0 - a).ln() }
        })
        .sum()
}

/// L2 penalty `(λ / 2) · Σ w²` over every non-bias weight.
pub fn regularization_penalty(network: &Network, regularization: f64) -> f64 {
    regularization / 2.0 * network.input_weight_square_sum()
}

/// Regularized mean cost: `(Σ costs + penalty) / m`.
pub fn batch_cost(network: &Network, costs: &[f64], regularization: f64) -> f64 {
    let total: f64 = costs.iter().sum();
    (total + regularization_penalty(network, regularization)) / costs.len() as f64
}

/// Forward passes and labels straight to the batch cost.
pub fn cost_of(network: &Network, passes: &[ForwardPass], labels: &[usize], regularization: f64) -> f64 {
    let costs: Vec<f64> = passes
        .iter()
        .zip(labels.iter())
        .map(|(pass, &label)| example_cost(pass, label))
        .collect();
    batch_cost(network, &costs, regularization)
}
