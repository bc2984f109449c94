use rayon::prelude::*;

use crate::activation::sigmoid::sigmoid_gradient;
use crate::math::matrix::WeightMatrix;
use crate::network::network::Network;
use crate::propagation::forward::ForwardPass;

/// Output layer error for one example: the output activations with 1
/// subtracted at the true label. This is the cross-entropy gradient with
/// respect to the output sums when paired with sigmoid outputs.
pub fn output_errors(pass: &ForwardPass, label: usize) -> Vec<f64> {
    let mut errors = pass.output().to_vec();
    errors[label] -= 1.0;
    errors
}

/// Error signal of every weight layer's output nodes for one example.
///
/// `errors[l][o]` is the gradient of the example's cost with respect to
/// `sums[l][o]`. Hidden layers use
/// `σ'(sum[l][i]) · Σ_o W[l+1][o][i+1] · errors[l+1][o]`.
pub fn layer_errors(network: &Network, pass: &ForwardPass, label: usize) -> Vec<Vec<f64>> {
    let layer_count = network.layer_count();
    let mut errors = vec![Vec::new(); layer_count];
    errors[layer_count - 1] = output_errors(pass, label);

    for l in (0..layer_count - 1).rev() {
        let next = network.layer(l + 1);
        let next_errors = &errors[l + 1];
        let layer: Vec<f64> = (0..next.input_count())
            .map(|i| {
                let back: f64 = (0..next.output_count())
                    .map(|o| next.input_weight(o, i) * next_errors[o])
                    .sum();
                back * sigmoid_gradient(pass.sums()[l][i])
            })
            .collect();
        errors[l] = layer;
    }

    errors
}

/// Batch-averaged, L2-regularized gradient of the batch cost, one matrix per
/// layer with the same shape as that layer's weights.
///
/// Bias columns get no regularization term.
pub fn gradients(
    network: &Network,
    passes: &[ForwardPass],
    labels: &[usize],
    regularization: f64,
) -> Vec<WeightMatrix> {
    assert_eq!(passes.len(), labels.len(), "one label per forward pass");
    assert!(!passes.is_empty(), "gradient of an empty batch");

    let batch_errors: Vec<Vec<Vec<f64>>> = passes
        .par_iter()
        .zip(labels.par_iter())
        .map(|(pass, &label)| layer_errors(network, pass, label))
        .collect();

    let m = passes.len() as f64;
    network
        .layers()
        .iter()
        .enumerate()
        .map(|(l, weights)| {
            let mut grad = WeightMatrix::zeros(weights.output_count(), weights.input_count());
            // Accumulate in example order so the sum is reproducible.
            for (pass, errors) in passes.iter().zip(batch_errors.iter()) {
                let inputs = &pass.activations()[l];
                for o in 0..weights.rows() {
                    let error = errors[l][o];
                    for j in 0..weights.cols() {
                        grad.set(o, j, grad.get(o, j) + error * inputs[j]);
                    }
                }
            }
            for o in 0..weights.rows() {
                for j in 0..weights.cols() {
                    let mut g = grad.get(o, j) / m;
                    if j > 0 {
                        g += regularization / m * weights.get(o, j);
                    }
                    grad.set(o, j, g);
                }
            }
            grad
        })
        .collect()
}

/// `network - rate · gradients`, as a new network.
///
/// # Panics
/// Panics if the gradient shapes do not match the layers.
pub fn apply_gradients(network: &Network, gradients: &[WeightMatrix], rate: f64) -> Network {
    assert_eq!(network.layer_count(), gradients.len(), "one gradient per layer");
    let layers = network
        .layers()
        .iter()
        .zip(gradients.iter())
        .map(|(weights, grad)| weights - &grad.map(|g| g * rate))
        .collect();
    Network::with_layers(layers)
}

/// One gradient descent step over the batch. `network` is left untouched.
pub fn propagate_backwards(
    network: &Network,
    passes: &[ForwardPass],
    labels: &[usize],
    rate: f64,
    regularization: f64,
) -> Network {
    let grads = gradients(network, passes, labels, regularization);
    apply_gradients(network, &grads, rate)
}
