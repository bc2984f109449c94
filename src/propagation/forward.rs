use rayon::prelude::*;

use crate::activation::sigmoid::sigmoid;
use crate::network::network::Network;

/// Everything one forward pass computes for a single example.
///
/// `activations[0]` is the example itself. Every activation vector except
/// the output layer's carries a leading bias value of 1, so
/// `activations[l]` is exactly the input vector of weight layer `l`.
/// `sums[l]` holds the pre-activation values produced by weight layer `l`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    sums: Vec<Vec<f64>>,
    activations: Vec<Vec<f64>>,
    prediction: usize,
}

impl ForwardPass {
    pub fn sums(&self) -> &[Vec<f64>] {
        &self.sums
    }

    pub fn activations(&self) -> &[Vec<f64>] {
        &self.activations
    }

    /// Output layer activations.
    pub fn output(&self) -> &[f64] {
        &self.activations[self.activations.len() - 1]
    }

    /// Index of the most active output node.
    pub fn prediction(&self) -> usize {
        self.prediction
    }
}

/// Feeds `example` through `network`.
///
/// # Panics
/// Panics if `example.len()` differs from the network's input width.
pub fn propagate(network: &Network, example: &[f64]) -> ForwardPass {
    assert_eq!(
        example.len(),
        network.input_size(),
        "example width must match the input layer"
    );

    let layer_count = network.layer_count();
    let mut sums = Vec::with_capacity(layer_count);
    let mut activations = Vec::with_capacity(layer_count + 1);
    activations.push(with_bias(example));

    for (l, weights) in network.layers().iter().enumerate() {
        let input = &activations[l];
        let layer_sums: Vec<f64> = weights
            .iter_rows()
            .map(|row| row.iter().zip(input.iter()).map(|(w, a)| w * a).sum())
            .collect();
        let outputs = layer_sums.iter().map(|&z| sigmoid(z));

        let next = if l + 1 < layer_count {
            std::iter::once(1.0).chain(outputs).collect()
        } else {
            outputs.collect()
        };
        sums.push(layer_sums);
        activations.push(next);
    }

    let prediction = argmax(&activations[layer_count]);
    ForwardPass {
        sums,
        activations,
        prediction,
    }
}

/// Forward passes for a whole batch, in input order.
pub fn propagate_batch(network: &Network, examples: &[Vec<f64>]) -> Vec<ForwardPass> {
    examples
        .par_iter()
        .map(|example| propagate(network, example))
        .collect()
}

/// Index of the maximum element. Ties go to the lowest index; NaN never wins
/// over a number.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || (values[best].is_nan() && !v.is_nan()) {
            best = i;
        }
    }
    best
}

fn with_bias(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(1.0);
    out.extend_from_slice(values);
    out
}
