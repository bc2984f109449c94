use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::math::matrix::WeightMatrix;

/// Half-width of the uniform range initial weights are drawn from.
pub const INIT_EPSILON: f64 = 0.12;

/// Random weights for a layer of `output_count` nodes fed by `input_count`
/// inputs.
///
/// Every entry, bias column included, is drawn independently from
/// `[-INIT_EPSILON, INIT_EPSILON]`, row by row.
pub fn init_layer<R: Rng + ?Sized>(input_count: usize, output_count: usize, rng: &mut R) -> WeightMatrix {
    let dist = Uniform::new_inclusive(-INIT_EPSILON, INIT_EPSILON);
    WeightMatrix::from_fn(output_count, input_count, |_, _| dist.sample(rng))
}

/// Random weights for a whole network.
///
/// With `hidden_layer_count == 0` the result is a single input→output
/// matrix. Otherwise it is input→hidden, `hidden_layer_count - 1`
/// hidden→hidden matrices, then hidden→output.
pub fn init_network<R: Rng + ?Sized>(
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    hidden_layer_count: usize,
    rng: &mut R,
) -> Vec<WeightMatrix> {
    if hidden_layer_count == 0 {
        return vec![init_layer(input_size, output_size, rng)];
    }

    let mut layers = Vec::with_capacity(hidden_layer_count + 1);
    layers.push(init_layer(input_size, hidden_size, rng));
    for _ in 1..hidden_layer_count {
        layers.push(init_layer(hidden_size, hidden_size, rng));
    }
    layers.push(init_layer(hidden_size, output_size, rng));
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn layer_has_bias_column() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let m = init_layer(3, 5, &mut rng);
        assert_eq!(m.rows(), 5);
        assert_eq!(m.cols(), 4);
    }

    #[test]
    fn entries_stay_within_epsilon() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for m in init_network(6, 8, 3, 3, &mut rng) {
            for row in m.iter_rows() {
                for &w in row {
                    assert!((-INIT_EPSILON..=INIT_EPSILON).contains(&w), "{w} out of range");
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_identical_weights() {
        let a = init_network(4, 3, 2, 2, &mut ChaCha8Rng::seed_from_u64(99));
        let b = init_network(4, 3, 2, 2, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
        for (x, y) in a.iter().zip(b.iter()) {
            for (rx, ry) in x.iter_rows().zip(y.iter_rows()) {
                for (wx, wy) in rx.iter().zip(ry.iter()) {
                    assert_eq!(wx.to_bits(), wy.to_bits());
                }
            }
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = init_network(4, 3, 2, 1, &mut ChaCha8Rng::seed_from_u64(1));
        let b = init_network(4, 3, 2, 1, &mut ChaCha8Rng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn no_hidden_layers_connects_input_to_output() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layers = init_network(4, 7, 3, 0, &mut rng);
        assert_eq!(layers.len(), 1);
        assert_eq!((layers[0].rows(), layers[0].cols()), (3, 5));
    }

    #[test]
    fn deep_network_shapes_chain() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layers = init_network(2, 5, 3, 3, &mut rng);
        let shapes: Vec<(usize, usize)> = layers.iter().map(|m| (m.rows(), m.cols())).collect();
        assert_eq!(shapes, vec![(5, 3), (5, 6), (5, 6), (3, 6)]);
    }
}
